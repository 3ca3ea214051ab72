use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;
use crate::storage::reports::ensure_dir;

pub const SKILL_CSV: &str = "skill_frequency.csv";
pub const MARKET_CSV: &str = "market_data.csv";

/// Write `rows` as CSV with a header row. Returns `None` when there is nothing to write.
pub fn write_csv<T: Serialize>(rows: &[T], dir: &Path, file_name: &str) -> Result<Option<PathBuf>> {
    if rows.is_empty() {
        tracing::info!("No rows for {}, skipping export", file_name);
        return Ok(None);
    }

    let path = ensure_dir(dir)?.join(file_name);
    let mut writer = csv::Writer::from_path(&path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    tracing::info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(Some(path))
}
