//! Unified error types for the crate.
//!
//! [`AnalyzerError`] is what the public entry points return. [`ResolveError`] describes why a
//! symbolic decorator argument could not be turned into a literal; it never escapes a scan.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for analyzer operations.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Source or manifest file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("utf8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("tree-sitter language error")]
    TreeSitterLanguage,

    #[error("tree-sitter parse error")]
    TreeSitterParse,

    /// A manifest or config file exists but is not valid JSON5 (or has an unexpected shape).
    #[error("invalid JSON5 in {}: {source}", .path.display())]
    Json5 {
        path: PathBuf,
        #[source]
        source: json5::Error,
    },

    /// Invalid or unsupported configuration.
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;

/// Fail-soft outcome of resolving one symbolic argument.
///
/// The visitor logs these and drops the argument; the scan itself keeps going.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("`{0}` is neither imported nor declared earlier in this file")]
    Unbound(String),

    #[error("module `{specifier}` not found from {}", .from.display())]
    ModuleNotFound { specifier: String, from: PathBuf },

    #[error("no manifest found at or above {}", .0.display())]
    NoManifest(PathBuf),

    #[error("package `{package}` is not listed in {}", .manifest.display())]
    DependencyNotListed { package: String, manifest: PathBuf },

    #[error("`{symbol}` is not declared in {}", .file.display())]
    NotFound { symbol: String, file: PathBuf },

    #[error("`{0}` is not a string or boolean literal")]
    NotLiteral(String),

    #[error("cyclic resolution re-enters {}", .0.display())]
    Cycle(PathBuf),

    #[error("resolution depth limit {0} exceeded")]
    DepthExceeded(usize),

    #[error("cannot scan {}: {reason}", .path.display())]
    Unreadable { path: PathBuf, reason: String },
}
