//! Flatten nested center/session payloads into tabular rows.

use crate::error::PipelineError;
use crate::model::{ApiCenter, SessionRow};

/// Produce one row per (center, session) pair.
///
/// Center fields are duplicated onto every row under them. The slot list is
/// rendered as a single ", "-joined string of its stringified elements; an
/// absent list renders as the empty string. A center that does not match the
/// fixed schema fails the whole call with [`PipelineError::Schema`] — the
/// caller decides whether that is fatal.
pub fn flatten_centers(centers: &[serde_json::Value]) -> Result<Vec<SessionRow>, PipelineError> {
    let mut rows = Vec::new();

    for value in centers {
        let center: ApiCenter = serde_json::from_value(value.clone())
            .map_err(|e| PipelineError::Schema(format!("center record: {e}")))?;

        for session in &center.sessions {
            rows.push(SessionRow {
                name: center.name.clone(),
                address: center.address.clone(),
                block_name: center.block_name.clone(),
                state_name: center.state_name.clone(),
                district_name: center.district_name.clone(),
                pincode: center.pincode,
                from_time: center.from.clone(),
                to_time: center.to.clone(),
                fee_type: center.fee_type.clone(),
                date: session.date.clone(),
                available_capacity: session.available_capacity,
                min_age_limit: session.min_age_limit,
                vaccine: session.vaccine.clone(),
                slots: render_slots(&session.slots),
                ts: String::new(),
            });
        }
    }

    Ok(rows)
}

fn render_slots(slots: &[serde_json::Value]) -> String {
    slots
        .iter()
        .map(|slot| match slot {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn center(name: &str, sessions: serde_json::Value) -> serde_json::Value {
        json!({
            "name": name,
            "address": "1 Main St",
            "block_name": "Central",
            "state_name": "Kerala",
            "district_name": "Ernakulam",
            "pincode": 682001,
            "from": "09:00:00",
            "to": "17:00:00",
            "fee_type": "Free",
            "sessions": sessions,
        })
    }

    fn session(date: &str, capacity: u32, slots: serde_json::Value) -> serde_json::Value {
        json!({
            "date": date,
            "available_capacity": capacity,
            "min_age_limit": 18,
            "vaccine": "COVISHIELD",
            "slots": slots,
        })
    }

    #[test]
    fn one_row_per_center_session_pair() {
        let centers = vec![
            center(
                "Town Hall PHC",
                json!([
                    session("01-06-2024", 5, json!(["09:00AM-11:00AM"])),
                    session("02-06-2024", 3, json!(["09:00AM-11:00AM"])),
                ]),
            ),
            center(
                "Harbour CHC",
                json!([session("01-06-2024", 0, json!([]))]),
            ),
        ];

        let rows = flatten_centers(&centers).unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows[..2].iter().all(|r| r.name == "Town Hall PHC"));
        assert_eq!(rows[2].name, "Harbour CHC");
        assert!(rows.iter().all(|r| r.pincode == 682001));
    }

    #[test]
    fn slot_lists_join_with_comma_space() {
        let centers = vec![center(
            "Town Hall PHC",
            json!([session(
                "01-06-2024",
                5,
                json!(["09:00AM-11:00AM", "11:00AM-01:00PM", 3])
            )]),
        )];
        let rows = flatten_centers(&centers).unwrap();
        assert_eq!(rows[0].slots, "09:00AM-11:00AM, 11:00AM-01:00PM, 3");
    }

    #[test]
    fn single_element_slot_list_has_no_separator() {
        let centers = vec![center(
            "Town Hall PHC",
            json!([session("01-06-2024", 5, json!(["09:00AM-11:00AM"]))]),
        )];
        let rows = flatten_centers(&centers).unwrap();
        assert_eq!(rows[0].slots, "09:00AM-11:00AM");
    }

    #[test]
    fn absent_slot_list_renders_empty() {
        let mut c = center("Town Hall PHC", json!([]));
        c["sessions"] = json!([{
            "date": "01-06-2024",
            "available_capacity": 5,
            "min_age_limit": 18,
            "vaccine": "COVISHIELD",
        }]);
        let rows = flatten_centers(&[c]).unwrap();
        assert_eq!(rows[0].slots, "");
    }

    #[test]
    fn missing_center_field_is_a_schema_error() {
        let mut c = center("Town Hall PHC", json!([]));
        c.as_object_mut().unwrap().remove("pincode");
        let err = flatten_centers(&[c]).unwrap_err();
        assert!(matches!(err, PipelineError::Schema(_)));
    }

    #[test]
    fn missing_session_field_is_a_schema_error() {
        let c = center(
            "Town Hall PHC",
            json!([{
                "date": "01-06-2024",
                "min_age_limit": 18,
                "vaccine": "COVISHIELD",
                "slots": [],
            }]),
        );
        let err = flatten_centers(&[c]).unwrap_err();
        assert!(matches!(err, PipelineError::Schema(_)));
    }

    #[test]
    fn no_centers_means_no_rows() {
        assert!(flatten_centers(&[]).unwrap().is_empty());
    }
}
