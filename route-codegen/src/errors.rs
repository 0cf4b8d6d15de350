//! Error type for generation runs.

use route_analyzer::AnalyzerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid JSON5 in {}: {source}", .path.display())]
    Json5 {
        path: PathBuf,
        #[source]
        source: json5::Error,
    },

    #[error("route `{route}`: `{param_name}` is not a valid parameter name")]
    InvalidParamName { route: String, param_name: String },

    #[error("render error: {0}")]
    Fmt(#[from] std::fmt::Error),

    #[error("analyzer error: {0}")]
    Analyzer(#[from] AnalyzerError),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CodegenError>;

/// Attach the offending path to an I/O error.
pub(crate) fn io_err(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> CodegenError {
    let path = path.into();
    move |source| CodegenError::Io { path, source }
}
