//! Batch report output.

use std::path::Path;

use anyhow::{Context, Result};
use ticketdl_core::BatchReport;

/// Writes `report` as pretty-printed JSON, creating parent directories.
pub async fn write_report(path: &Path, report: &BatchReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create {:?}", parent))?;
    }

    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write report to {:?}", path))?;
    Ok(())
}
