//! Public entry point: scan one source file for route declarations.

use crate::analysis::visitor::scan_file;
use crate::config::model::AnalyzerConfig;
use crate::errors::{AnalyzerError, Result};
use crate::model::AnalyzeResult;
use std::path::Path;
use tracing::{debug, info};

/// Scanner bound to one validated [`AnalyzerConfig`].
///
/// Holds no state between calls: every [`RouteScanner::scan`] re-reads and re-parses its input and
/// every nested resolution starts from an empty binding table.
#[derive(Debug, Clone, Default)]
pub struct RouteScanner {
    cfg: AnalyzerConfig,
}

impl RouteScanner {
    pub fn new(cfg: AnalyzerConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    /// Scan `entry` and return its route declarations in source order.
    ///
    /// # Errors
    /// Only when `entry` itself cannot be read or parsed. Unresolvable decorator arguments are
    /// logged and drop the affected declaration; a file without routes yields `Ok(vec![])`.
    #[tracing::instrument(level = "debug", skip_all, fields(entry = %entry.display()))]
    pub fn scan(&self, entry: &Path) -> Result<Vec<AnalyzeResult>> {
        let key = dunce::canonicalize(entry).map_err(|source| AnalyzerError::Io {
            path: entry.to_path_buf(),
            source,
        })?;
        debug!(canonical = %key.display(), "Scanning");

        let scan = scan_file(&self.cfg, entry, None, vec![key])?;
        info!(
            path = %entry.display(),
            routes = scan.results.len(),
            "Scanned route declarations"
        );
        Ok(scan.results)
    }
}

/// [`RouteScanner::scan`] with the default configuration.
pub fn scan(entry: &Path) -> Result<Vec<AnalyzeResult>> {
    RouteScanner::default().scan(entry)
}
