//! Snapshot consolidation: scan the historical dump root, derive temporal
//! features from each snapshot's capture time, and merge everything into one
//! combined dataset.
//!
//! The combined file is written only after the full dataset is computed, so
//! a failed run never leaves a partially-written output behind.

use std::path::Path;

use tracing::{debug, info};

use crate::error::PipelineError;
use crate::model::{parse_session_date, retain_available, DerivedRow, SessionRow};
use crate::snapshot::{self, HarvestStamp, SNAPSHOT_FILE};

/// Default location of the combined dataset.
pub const DEFAULT_COMBINED_PATH: &str = "analysis_data/combined_data.csv";

/// Aggregate every snapshot under `root` into one combined dataset and
/// persist it at `out_path`, overwriting any prior contents.
///
/// Row order is snapshot discovery order, then original row order within
/// each snapshot. A snapshot that is empty after the capacity filter
/// contributes zero rows; a folder name that does not parse as a harvest
/// stamp aborts the run; zero surviving snapshots is [`PipelineError::NoData`].
pub fn aggregate(root: &Path, out_path: &Path) -> Result<Vec<DerivedRow>, PipelineError> {
    let mut combined: Vec<DerivedRow> = Vec::new();
    let mut surviving = 0usize;

    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }

        let folder_name = entry.file_name().to_string_lossy().into_owned();
        let stamp = HarvestStamp::from_folder_name(&folder_name)?;

        let file = entry.path().join(SNAPSHOT_FILE);
        if !file.exists() {
            debug!("snapshot folder {folder_name} has no table, skipping");
            continue;
        }

        let rows = retain_available(snapshot::read_snapshot(&file)?);
        if rows.is_empty() {
            debug!("snapshot {folder_name} is empty after filtering, skipping");
            continue;
        }

        surviving += 1;
        combined.extend(derive_rows(rows, &stamp)?);
    }

    if combined.is_empty() {
        return Err(PipelineError::NoData(root.display().to_string()));
    }

    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = csv::Writer::from_path(out_path)?;
    for row in &combined {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!(
        rows = combined.len(),
        snapshots = surviving,
        "combined dataset written to {}",
        out_path.display()
    );

    Ok(combined)
}

/// Attach the harvest time decomposition and day offset to every row.
fn derive_rows(
    rows: Vec<SessionRow>,
    stamp: &HarvestStamp,
) -> Result<Vec<DerivedRow>, PipelineError> {
    rows.into_iter()
        .map(|row| {
            let session_date = parse_session_date(&row.date)?;
            let day_offset = session_date.signed_duration_since(stamp.date()).num_days();
            Ok(DerivedRow {
                name: row.name,
                address: row.address,
                block_name: row.block_name,
                state_name: row.state_name,
                district_name: row.district_name,
                pincode: row.pincode,
                from_time: row.from_time,
                to_time: row.to_time,
                fee_type: row.fee_type,
                date: row.date,
                available_capacity: row.available_capacity,
                min_age_limit: row.min_age_limit,
                vaccine: row.vaccine,
                slots: row.slots,
                harvest_year: stamp.year(),
                harvest_month: stamp.month(),
                harvest_day: stamp.day(),
                harvest_hour: stamp.hour(),
                harvest_minute: stamp.minute(),
                day_offset,
            })
        })
        .collect()
}
