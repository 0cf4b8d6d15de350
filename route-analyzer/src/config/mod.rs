//! Configuration loader.
//!
//! [`AnalyzerConfig`] can come from defaults or from a JSON5 file; either way it is validated
//! before a scanner accepts it.

pub mod model;

use crate::config::model::AnalyzerConfig;
use crate::errors::{AnalyzerError, Result};
use std::path::Path;

/// Load [`AnalyzerConfig`] from a JSON5 file, falling back to defaults for missing fields.
pub fn load_from_file(path: &Path) -> Result<AnalyzerConfig> {
    let text = std::fs::read_to_string(path).map_err(|source| AnalyzerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg: AnalyzerConfig = json5::from_str(&text).map_err(|source| AnalyzerError::Json5 {
        path: path.to_path_buf(),
        source,
    })?;
    cfg.validate()?;
    Ok(cfg)
}

/// Same as [`load_from_file`] but returns defaults when no path is given.
pub fn load_or_default(path: Option<&Path>) -> Result<AnalyzerConfig> {
    match path {
        Some(p) => load_from_file(p),
        None => Ok(AnalyzerConfig::default()),
    }
}
