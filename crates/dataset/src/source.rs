//! Where touchpoint rows come from.

use std::path::{Path, PathBuf};

use funnel_core::{Error, RawTouchpoint, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::synthetic::{generate, SyntheticConfig};

/// Dataset source configuration.
///
/// A JSON `path` wins when set; otherwise rows are generated from `synthetic`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// JSON file with an array of rows or an object with `records`
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub synthetic: SyntheticConfig,
}

impl DatasetConfig {
    /// Read or generate the raw rows.
    pub fn load_rows(&self) -> Result<Vec<RawTouchpoint>> {
        match &self.path {
            Some(path) => read_json_file(path),
            None => {
                let rows = generate(&self.synthetic)?;
                info!(
                    seed = self.synthetic.seed,
                    rows = rows.len(),
                    "Using synthetic dataset"
                );
                Ok(rows)
            }
        }
    }
}

/// Read raw rows from a JSON file.
pub fn read_json_file(path: &Path) -> Result<Vec<RawTouchpoint>> {
    let bytes = std::fs::read(path)
        .map_err(|e| Error::source(format!("cannot read {}: {}", path.display(), e)))?;
    let rows = RawTouchpoint::parse_dataset(&bytes)?;
    info!(path = %path.display(), rows = rows.len(), "Read dataset file");
    Ok(rows)
}

/// Write raw rows as a JSON array (the inverse of [`read_json_file`]).
pub fn write_json_file(path: &Path, rows: &[RawTouchpoint]) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(rows)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
