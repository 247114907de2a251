//! On-disk preset persistence.

use std::path::Path;

use serde_json::Value;
use shelfmark_types::FilterPreset;

use crate::error::{Error, Result};

pub const PRESETS_FILE: &str = "presets.json";

/// Read presets from `path`; a missing file means no presets.
///
/// Every entry goes through the strict preset schema, so a hand-edited file
/// with an unknown field or an inverted range is rejected as a whole.
pub fn load_presets(path: &Path) -> Result<Vec<FilterPreset>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|e| Error::InvalidInput(format!("{}: {}", path.display(), e)))?;
    let entries = value.as_array().ok_or_else(|| {
        Error::InvalidInput(format!("{}: expected a JSON array of presets", path.display()))
    })?;

    entries
        .iter()
        .map(|entry| {
            FilterPreset::from_json(entry)
                .map_err(|e| Error::InvalidInput(format!("{}: {}", path.display(), e)))
        })
        .collect()
}

pub fn save_presets(path: &Path, presets: &[FilterPreset]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let value = Value::Array(presets.iter().map(FilterPreset::to_json).collect());
    let content = serde_json::to_string_pretty(&value)
        .map_err(|e| Error::Internal(anyhow::Error::new(e)))?;
    std::fs::write(path, content)?;
    Ok(())
}
