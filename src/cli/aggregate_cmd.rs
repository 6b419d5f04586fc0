//! `slotpulse aggregate` — merge historical snapshots into one dataset.

use std::path::PathBuf;

use anyhow::Result;

use crate::consolidation;

/// Run the aggregate command.
pub async fn run(dump_root: PathBuf, out: PathBuf) -> Result<()> {
    let combined = consolidation::aggregate(&dump_root, &out)?;

    println!(
        "  Combined {} rows into {}",
        combined.len(),
        out.display()
    );
    Ok(())
}
