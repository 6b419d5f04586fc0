//! Core data types for the availability pipeline.
//!
//! The upstream payload schema is fixed: a center carries nine descriptive
//! fields plus a list of sessions, and a session carries five. Both are
//! validated here with serde rather than discovered key-by-key at depth.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// A service center as returned by the upstream API, with its nested
/// sessions. Missing fields fail deserialization and surface as a schema
/// error at the flatten boundary.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCenter {
    pub name: String,
    pub address: String,
    pub block_name: String,
    pub state_name: String,
    pub district_name: String,
    pub pincode: u32,
    pub from: String,
    pub to: String,
    pub fee_type: String,
    pub sessions: Vec<ApiSession>,
}

/// One bookable session under a center. `slots` may be absent upstream;
/// every other field is required.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSession {
    pub date: String,
    pub available_capacity: u32,
    pub min_age_limit: u32,
    pub vaccine: String,
    #[serde(default)]
    pub slots: Vec<serde_json::Value>,
}

/// One flattened (center, session) pair: the row unit of a snapshot file.
///
/// Column order is fixed: center fields first, then session fields, then
/// the last-modified stamp set by the harvester.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRow {
    pub name: String,
    pub address: String,
    pub block_name: String,
    pub state_name: String,
    pub district_name: String,
    pub pincode: u32,
    #[serde(rename = "from")]
    pub from_time: String,
    #[serde(rename = "to")]
    pub to_time: String,
    pub fee_type: String,
    pub date: String,
    pub available_capacity: u32,
    pub min_age_limit: u32,
    pub vaccine: String,
    pub slots: String,
    /// Harvest stamp, `YYYY-MM-DD HH-MM`. Empty until the harvester sets it.
    pub ts: String,
}

/// Snapshot CSV header, kept in `SessionRow` field order. Written explicitly
/// when a snapshot has zero rows (serde only emits headers alongside a row).
pub const SNAPSHOT_HEADER: [&str; 15] = [
    "name",
    "address",
    "block_name",
    "state_name",
    "district_name",
    "pincode",
    "from",
    "to",
    "fee_type",
    "date",
    "available_capacity",
    "min_age_limit",
    "vaccine",
    "slots",
    "ts",
];

/// A combined-dataset row: a session row minus the stamp, plus the harvest
/// time decomposition and the session's day offset from the harvest date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedRow {
    pub name: String,
    pub address: String,
    pub block_name: String,
    pub state_name: String,
    pub district_name: String,
    pub pincode: u32,
    #[serde(rename = "from")]
    pub from_time: String,
    #[serde(rename = "to")]
    pub to_time: String,
    pub fee_type: String,
    pub date: String,
    pub available_capacity: u32,
    pub min_age_limit: u32,
    pub vaccine: String,
    pub slots: String,
    pub harvest_year: i32,
    pub harvest_month: u32,
    pub harvest_day: u32,
    pub harvest_hour: u32,
    pub harvest_minute: u32,
    /// Whole days between the session date and the harvest date. Signed and
    /// never clamped.
    pub day_offset: i64,
}

/// Parse a session date, accepting the upstream `dd-mm-yyyy` form as well as
/// ISO `yyyy-mm-dd`.
pub fn parse_session_date(raw: &str) -> Result<NaiveDate, PipelineError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d-%m-%Y"))
        .map_err(|_| PipelineError::Schema(format!("unparseable session date: {raw:?}")))
}

/// Keep only rows that still have bookable capacity.
pub fn retain_available(mut rows: Vec<SessionRow>) -> Vec<SessionRow> {
    rows.retain(|row| row.available_capacity > 0);
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(capacity: u32) -> SessionRow {
        SessionRow {
            name: "Town Hall PHC".into(),
            address: "1 Main St".into(),
            block_name: "Central".into(),
            state_name: "Kerala".into(),
            district_name: "Ernakulam".into(),
            pincode: 682001,
            from_time: "09:00:00".into(),
            to_time: "17:00:00".into(),
            fee_type: "Free".into(),
            date: "01-06-2024".into(),
            available_capacity: capacity,
            min_age_limit: 18,
            vaccine: "COVISHIELD".into(),
            slots: "09:00AM-11:00AM".into(),
            ts: String::new(),
        }
    }

    #[test]
    fn parses_both_date_forms() {
        assert_eq!(
            parse_session_date("2024-03-12").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()
        );
        assert_eq!(
            parse_session_date("12-03-2024").unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 12).unwrap()
        );
    }

    #[test]
    fn rejects_garbage_dates() {
        assert!(matches!(
            parse_session_date("soon"),
            Err(PipelineError::Schema(_))
        ));
    }

    #[test]
    fn capacity_filter_is_idempotent() {
        let rows = vec![row(5), row(0), row(2), row(0)];
        let once = retain_available(rows);
        let twice = retain_available(once.clone());
        assert_eq!(once.len(), 2);
        assert_eq!(once, twice);
    }

    #[test]
    fn header_matches_row_field_count() {
        let mut writer = csv::Writer::from_writer(vec![]);
        writer.serialize(row(1)).unwrap();
        let data = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let header_line = data.lines().next().unwrap();
        assert_eq!(header_line, SNAPSHOT_HEADER.join(","));
    }
}
