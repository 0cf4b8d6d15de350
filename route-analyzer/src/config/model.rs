//! Configuration data structures for the route analyzer.
//!
//! Groups:
//! - [`AnalyzerConfig`]: top-level container
//! - [`DecoratorConfig`]: recognized decorator name and its argument keys
//!
//! All structs are `serde`-friendly so they can be loaded from JSON/JSON5.

use crate::errors::{AnalyzerError, Result};
use serde::{Deserialize, Serialize};

/// Top-level configuration for a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalyzerConfig {
    /// Which decorator marks a routable component and how its arguments are named.
    pub decorator: DecoratorConfig,
    /// Bare word that introduces a Form-A declaration (`struct` in ArkTS).
    pub declaration_keyword: String,
    /// Extensions appended to module candidates, in preference order.
    pub source_extensions: Vec<String>,
    /// Stem of a package's conventional entry file (`Index` -> `Index.ets`).
    pub entry_file_stem: String,
    /// Package manifest file name.
    pub manifest_file_name: String,
    /// Directories searched upward for bare package names.
    pub module_stores: Vec<String>,
    /// Marker for manifest dependencies that live on the local filesystem.
    pub local_dependency_prefix: String,
    /// Maximum number of nested files one resolution may visit.
    pub max_resolve_depth: usize,
    /// Log every resolution step at `debug` level.
    pub trace_resolution: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            decorator: DecoratorConfig::default(),
            declaration_keyword: "struct".into(),
            source_extensions: vec![".ets".into(), ".ts".into(), ".js".into()],
            entry_file_stem: "Index".into(),
            manifest_file_name: "oh-package.json5".into(),
            module_stores: vec!["oh_modules".into(), "node_modules".into()],
            local_dependency_prefix: "file:".into(),
            max_resolve_depth: 8,
            trace_resolution: false,
        }
    }
}

impl AnalyzerConfig {
    /// Validate config sanity (no degenerate or absurd values).
    pub fn validate(&self) -> Result<()> {
        self.decorator.validate()?;
        if self.declaration_keyword.trim().is_empty() {
            return Err(AnalyzerError::Config(
                "`declarationKeyword` must not be empty".into(),
            ));
        }
        if self.source_extensions.is_empty() {
            return Err(AnalyzerError::Config(
                "`sourceExtensions` must list at least one extension".into(),
            ));
        }
        if let Some(bad) = self.source_extensions.iter().find(|e| !e.starts_with('.')) {
            return Err(AnalyzerError::Config(format!(
                "source extension `{bad}` must start with '.'"
            )));
        }
        if self.entry_file_stem.trim().is_empty() || self.manifest_file_name.trim().is_empty() {
            return Err(AnalyzerError::Config(
                "`entryFileStem` and `manifestFileName` must not be empty".into(),
            ));
        }
        // One redirect hop needs the imported module plus the module it forwards to.
        if self.max_resolve_depth < 2 {
            return Err(AnalyzerError::Config(format!(
                "`maxResolveDepth` must be at least 2, got {}",
                self.max_resolve_depth
            )));
        }
        Ok(())
    }

    /// Entry file names tried inside a package or directory, in preference order.
    pub fn entry_file_names(&self) -> Vec<String> {
        let lower = self.entry_file_stem.to_ascii_lowercase();
        let mut names = Vec::new();
        for stem in [self.entry_file_stem.as_str(), lower.as_str()] {
            for ext in &self.source_extensions {
                let name = format!("{stem}{ext}");
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }
}

/// Recognized route decorator and the keys of its object argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecoratorConfig {
    /// Call target, e.g. `AppRouter` in `@AppRouter({ ... })`.
    pub name: String,
    pub route_name_key: String,
    pub login_key: String,
    pub has_param_key: String,
    pub param_name_key: String,
}

impl Default for DecoratorConfig {
    fn default() -> Self {
        Self {
            name: "AppRouter".into(),
            route_name_key: "name".into(),
            login_key: "login".into(),
            has_param_key: "hasParam".into(),
            param_name_key: "paramName".into(),
        }
    }
}

impl DecoratorConfig {
    fn validate(&self) -> Result<()> {
        let fields = [
            ("decorator.name", &self.name),
            ("decorator.routeNameKey", &self.route_name_key),
            ("decorator.loginKey", &self.login_key),
            ("decorator.hasParamKey", &self.has_param_key),
            ("decorator.paramNameKey", &self.param_name_key),
        ];
        for (field, value) in fields {
            if value.trim().is_empty() {
                return Err(AnalyzerError::Config(format!("`{field}` must not be empty")));
            }
        }
        Ok(())
    }
}
