//! `slotpulse harvest` — run one snapshot harvest.

use std::path::PathBuf;

use anyhow::Result;

use crate::acquisition::{self, HarvestConfig, DEFAULT_TIMEOUT_MS};

/// Run the harvest command.
pub async fn run(districts: PathBuf, dump_root: PathBuf, base_url: String) -> Result<()> {
    let config = HarvestConfig {
        base_url,
        district_config: districts,
        dump_root,
        timeout_ms: DEFAULT_TIMEOUT_MS,
    };

    let snapshot = acquisition::harvest(&config).await?;

    println!(
        "  Harvested {} available sessions into {}",
        snapshot.rows.len(),
        config
            .dump_root
            .join(snapshot.stamp.folder_name())
            .display()
    );
    Ok(())
}
