//! Snapshot harvesting: poll every configured district once, flatten the
//! nested payloads, filter to bookable capacity, and persist one
//! timestamped snapshot.
//!
//! Districts are queried strictly sequentially. A failing district is
//! classified, logged, and dropped — one bad district never aborts the run.

pub mod districts;
pub mod flatten;
pub mod http_client;

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::error::PipelineError;
use crate::model::{retain_available, SessionRow};
use crate::snapshot::{self, HarvestStamp, Snapshot};

use http_client::HttpClient;

/// Default upstream API base URL.
pub const DEFAULT_BASE_URL: &str = "https://cdn-api.co-vin.in/api/v2";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_MS: u64 = 15_000;

/// Everything one harvest run needs to know.
#[derive(Debug, Clone)]
pub struct HarvestConfig {
    /// Upstream API base URL.
    pub base_url: String,
    /// Path to the district id configuration document.
    pub district_config: PathBuf,
    /// Directory that snapshot folders are created under.
    pub dump_root: PathBuf,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

/// Run one harvest: fetch all districts, flatten, stamp, filter, persist.
///
/// The snapshot folder is created idempotently and keyed by the run's start
/// time at minute granularity. The file is written even when the filtered
/// table is empty. Only a missing or malformed district configuration is
/// fatal.
pub async fn harvest(config: &HarvestConfig) -> Result<Snapshot, PipelineError> {
    let stamp = HarvestStamp::now();
    info!("starting harvest {}", stamp.folder_name());

    let dir = config.dump_root.join(stamp.folder_name());
    std::fs::create_dir_all(&dir)?;

    let district_ids = districts::load_district_ids(&config.district_config)?;

    let client = HttpClient::new(config.timeout_ms);
    let mut rows = run_districts(&client, &config.base_url, &district_ids).await;

    for row in &mut rows {
        row.ts = stamp.row_stamp();
    }

    let rows = retain_available(rows);
    if rows.is_empty() {
        warn!("harvest {} has no available sessions", stamp.folder_name());
    }

    snapshot::write_snapshot(&dir, &rows)?;
    info!(
        rows = rows.len(),
        "harvest {} written to {}",
        stamp.folder_name(),
        dir.display()
    );

    Ok(Snapshot { stamp, rows })
}

/// Query every district in order. A failing district contributes zero rows;
/// the failure class is logged so schema bugs stay distinguishable from
/// transient transport errors.
async fn run_districts(client: &HttpClient, base_url: &str, district_ids: &[u32]) -> Vec<SessionRow> {
    // Query date is re-derived from the wall clock, not the harvest stamp,
    // so a run that straddles midnight asks for the current day.
    let today = Local::now().date_naive();

    let mut combined = Vec::new();
    for &district_id in district_ids {
        match fetch_district(client, base_url, district_id, today).await {
            Ok(mut rows) => {
                debug!(district_id, rows = rows.len(), "district fetched");
                combined.append(&mut rows);
            }
            Err(e) => {
                warn!(district_id, class = e.class(), "district failed, ignoring: {e}");
            }
        }
    }
    combined
}

async fn fetch_district(
    client: &HttpClient,
    base_url: &str,
    district_id: u32,
    date: NaiveDate,
) -> Result<Vec<SessionRow>, PipelineError> {
    let url = format!(
        "{base_url}/appointment/sessions/public/calendarByDistrict?district_id={district_id}&date={}",
        date.format("%d-%m-%Y")
    );

    let body = client.fetch_json(&url).await?;
    let centers = body
        .get("centers")
        .and_then(|c| c.as_array())
        .ok_or_else(|| {
            PipelineError::Schema(format!("district {district_id}: response has no centers array"))
        })?;

    flatten::flatten_centers(centers)
}
