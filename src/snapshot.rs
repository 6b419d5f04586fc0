//! Snapshot naming and on-disk layout.
//!
//! A harvest run owns one folder under the dump root, named by its capture
//! time at minute granularity, and writes a single CSV inside it. Folder
//! names are the only timestamp carrier, so parsing them is an explicit,
//! validated step rather than a side effect of date parsing.

use std::path::Path;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{PipelineError, PipelineResult};
use crate::model::{SessionRow, SNAPSHOT_HEADER};

/// File name of the table inside every snapshot folder.
pub const SNAPSHOT_FILE: &str = "slots_data.csv";

/// Default directory that snapshot folders are created under.
pub const DEFAULT_DUMP_ROOT: &str = "data_dumps";

const FOLDER_STAMP_FORMAT: &str = "%Y_%m_%d_%H_%M";
const ROW_STAMP_FORMAT: &str = "%Y-%m-%d %H-%M";

/// A harvest capture time, truncated to minute granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestStamp(NaiveDateTime);

impl HarvestStamp {
    /// Current wall-clock time, truncated to the minute.
    pub fn now() -> Self {
        let now = Local::now().naive_local();
        let truncated = now
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now);
        Self(truncated)
    }

    /// Parse a snapshot folder name (`YYYY_MM_DD_HH_MM`) back into a stamp.
    pub fn from_folder_name(name: &str) -> PipelineResult<Self> {
        NaiveDateTime::parse_from_str(name, FOLDER_STAMP_FORMAT)
            .map(Self)
            .map_err(|e| PipelineError::MalformedFolderName(format!("{name}: {e}")))
    }

    /// Folder form, `YYYY_MM_DD_HH_MM`.
    pub fn folder_name(&self) -> String {
        self.0.format(FOLDER_STAMP_FORMAT).to_string()
    }

    /// Row-stamp form written into the `ts` column, `YYYY-MM-DD HH-MM`.
    pub fn row_stamp(&self) -> String {
        self.0.format(ROW_STAMP_FORMAT).to_string()
    }

    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }
}

/// One harvest run's output: the capture stamp plus the retained rows,
/// mirrored on disk as `<dump_root>/<folder_name>/slots_data.csv`.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub stamp: HarvestStamp,
    pub rows: Vec<SessionRow>,
}

/// Write the snapshot table into `dir`. A zero-row table still produces a
/// valid file with the full header.
pub fn write_snapshot(dir: &Path, rows: &[SessionRow]) -> PipelineResult<()> {
    let mut writer = csv::Writer::from_path(dir.join(SNAPSHOT_FILE))?;
    if rows.is_empty() {
        writer.write_record(SNAPSHOT_HEADER)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a snapshot table back from disk.
pub fn read_snapshot(path: &Path) -> PipelineResult<Vec<SessionRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}
