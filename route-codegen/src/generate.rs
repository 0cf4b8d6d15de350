//! Generation run: scan the configured files, then write builder, route map and index export.

use crate::config::GeneratorConfig;
use crate::errors::Result;
use crate::export::{builder, index_file, route_map};
use crate::model::{RouteEntry, RouterItem, RouterMap, is_identifier};
use route_analyzer::{AnalyzerConfig, RouteScanner};
use serde::Serialize;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{info, warn};

/// What a run produced.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSummary {
    pub scanned_files: usize,
    /// Scan files that could not be read or parsed.
    pub skipped_files: Vec<PathBuf>,
    pub routes: Vec<RouteEntry>,
    pub builder_file: Option<PathBuf>,
    pub route_map_file: Option<PathBuf>,
    /// `Index.ets` gained the builder export during this run.
    pub index_updated: bool,
}

/// [`generate_with`] using the default analyzer settings.
pub fn generate(cfg: &GeneratorConfig) -> Result<GenerationSummary> {
    generate_with(cfg, AnalyzerConfig::default())
}

/// Run one generation for `cfg`. `analyzer` supplies resolution settings; its decorator name and
/// declaration keyword are overridden from `cfg`.
///
/// Nothing is written when `scan_files` is empty.
#[tracing::instrument(level = "info", skip_all, fields(module = %cfg.module_name))]
pub fn generate_with(cfg: &GeneratorConfig, analyzer: AnalyzerConfig) -> Result<GenerationSummary> {
    cfg.validate()?;
    let mut summary = GenerationSummary::default();

    if cfg.scan_files.is_empty() {
        warn!("No scan files configured; nothing to generate");
        return Ok(summary);
    }

    let scanner = RouteScanner::new(cfg.analyzer_config(analyzer))?;
    let builder_dir = cfg.builder_dir_path();

    let mut seen_names = HashSet::new();
    for file in &cfg.scan_files {
        let source = cfg.source_path(file);
        summary.scanned_files += 1;
        let results = match scanner.scan(&source) {
            Ok(results) => results,
            Err(err) => {
                warn!(path = %source.display(), error = %err, "Failed to scan");
                summary.skipped_files.push(source);
                continue;
            }
        };
        for result in &results {
            let entry = RouteEntry::from_result(result, &builder_dir);
            if entry.has_param && !is_identifier(&entry.param_name) {
                warn!(
                    route = %entry.name,
                    param = %entry.param_name,
                    path = %source.display(),
                    "Parameter name is not an identifier; route skipped"
                );
                continue;
            }
            if !seen_names.insert(entry.name.clone()) {
                warn!(route = %entry.name, path = %source.display(), "Duplicate route name");
            }
            summary.routes.push(entry);
        }
    }
    info!(
        files = summary.scanned_files,
        routes = summary.routes.len(),
        "Collected routes"
    );

    let builder_path = builder_dir.join(&cfg.builder_file_name);
    let source = builder::render_builder(&cfg.module_name, &cfg.lib_name, &summary.routes)?;
    builder::write_builder(&builder_path, &source)?;
    summary.builder_file = Some(builder_path);

    let page_source_file = cfg.page_source_file();
    let map = RouterMap {
        router_map: summary
            .routes
            .iter()
            .map(|r| RouterItem::new(r, &cfg.module_name, &page_source_file))
            .collect(),
    };
    let map_dir = cfg.module_path.join(&cfg.router_map_dir);
    route_map::write_route_map(&map_dir, &map)?;
    summary.route_map_file = Some(map_dir.join(route_map::ROUTE_MAP_FILE));

    if !cfg.main_target {
        summary.index_updated =
            index_file::ensure_index_export(&cfg.module_path, &cfg.index_export_line())?;
    }

    Ok(summary)
}
