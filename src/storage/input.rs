use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};

/// Records parsed from an input file, plus how many were rejected.
#[derive(Debug)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

/// Read a JSON array of records.
///
/// A missing file or a document that is not an array is an error; individual
/// records that fail to parse are skipped with a warning.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Loaded<T>> {
    let raw = std::fs::read_to_string(path).map_err(|source| Error::InputFile {
        path: path.to_path_buf(),
        source,
    })?;

    let document: Value = serde_json::from_str(&raw).map_err(|e| Error::MalformedInput {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let Value::Array(items) = document else {
        return Err(Error::MalformedInput {
            path: path.to_path_buf(),
            reason: "expected a JSON array of records".to_string(),
        });
    };

    let mut records = Vec::with_capacity(items.len());
    let mut skipped = 0;
    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<T>(item) {
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                tracing::warn!(
                    "Skipping record {} in {}: {}",
                    index,
                    path.display(),
                    Error::InvalidRecord(e.to_string())
                );
            }
        }
    }

    tracing::debug!(
        "Loaded {} records from {} ({} skipped)",
        records.len(),
        path.display(),
        skipped
    );

    Ok(Loaded { records, skipped })
}
