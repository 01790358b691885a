//! Run summary persistence

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

use crate::models::RunSummary;

/// Write `summary` as pretty JSON
pub fn save_summary(summary: &RunSummary, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create summary file: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), summary)
        .context("Failed to serialize run summary")?;

    info!("Saved run summary to {}", path.display());
    Ok(())
}
