//! Generator options, mirroring the hvigor plugin configuration.
//!
//! Loaded from a JSON5 file (camelCase keys) or built in code. Missing optional fields take the
//! defaults below. `ROUTER_SCAN_FILES` (comma separated) appends to `scanFiles`.

use crate::errors::{CodegenError, Result, io_err};
use route_analyzer::AnalyzerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable whose comma separated entries are appended to `scan_files`.
pub const SCAN_FILES_ENV: &str = "ROUTER_SCAN_FILES";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneratorConfig {
    /// Module name written into every route's metadata.
    pub module_name: String,
    /// Module root; every other path is relative to it.
    pub module_path: PathBuf,
    /// Entry (`hap`) modules do not get an `Index.ets` export.
    pub main_target: bool,
    /// Router library the generated builder imports.
    pub lib_name: String,
    pub builder_dir: String,
    pub builder_file_name: String,
    pub router_map_dir: String,
    /// Decorator recognized as a route declaration.
    pub annotation: String,
    /// Form-A keyword; only the first entry is used.
    pub view_keyword: Vec<String>,
    /// Files to scan, relative to `module_path`; `.ets` is appended when missing.
    pub scan_files: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            module_name: String::new(),
            module_path: PathBuf::from("."),
            main_target: false,
            lib_name: "autorouter".into(),
            builder_dir: "src/main/ets/auto_router_generated".into(),
            builder_file_name: "RouterBuilder.ets".into(),
            router_map_dir: "src/main/resources/base/profile".into(),
            annotation: "AppRouter".into(),
            view_keyword: vec!["struct".into()],
            scan_files: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// Read a JSON5 config file. Relative `modulePath` values are taken relative to the file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(io_err(path))?;
        let mut cfg: GeneratorConfig =
            json5::from_str(&text).map_err(|source| CodegenError::Json5 {
                path: path.to_path_buf(),
                source,
            })?;
        if cfg.module_path.is_relative() {
            if let Some(dir) = path.parent() {
                cfg.module_path = dir.join(&cfg.module_path);
            }
        }
        Ok(cfg)
    }

    /// Append entries of `ROUTER_SCAN_FILES` from the process environment.
    pub fn with_env_scan_files(self) -> Self {
        match std::env::var(SCAN_FILES_ENV) {
            Ok(raw) => self.with_extra_scan_files(&raw),
            Err(_) => self,
        }
    }

    /// Append the comma separated entries of `raw`, skipping blanks and duplicates.
    pub fn with_extra_scan_files(mut self, raw: &str) -> Self {
        for file in raw.split(',').map(str::trim).filter(|f| !f.is_empty()) {
            if !self.scan_files.iter().any(|f| f == file) {
                self.scan_files.push(file.to_string());
            }
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.module_name.trim().is_empty() {
            return Err(CodegenError::Config("`moduleName` must not be empty".into()));
        }
        if self.builder_file_name.trim().is_empty() {
            return Err(CodegenError::Config(
                "`builderFileName` must not be empty".into(),
            ));
        }
        if self.view_keyword.iter().all(|k| k.trim().is_empty()) {
            return Err(CodegenError::Config(
                "`viewKeyword` must hold at least one keyword".into(),
            ));
        }
        Ok(())
    }

    /// Analyzer settings derived from `annotation` and `view_keyword`.
    pub fn analyzer_config(&self, base: AnalyzerConfig) -> AnalyzerConfig {
        let mut cfg = base;
        cfg.decorator.name = self.annotation.clone();
        if let Some(keyword) = self.view_keyword.iter().find(|k| !k.trim().is_empty()) {
            cfg.declaration_keyword = keyword.clone();
        }
        cfg
    }

    /// `<module>/<builderDir>`
    pub fn builder_dir_path(&self) -> PathBuf {
        self.module_path.join(&self.builder_dir)
    }

    /// `<builderDir>/<builderFileName>`, the `pageSourceFile` of every route.
    pub fn page_source_file(&self) -> String {
        format!(
            "{}/{}",
            self.builder_dir.trim_end_matches('/'),
            self.builder_file_name
        )
    }

    /// `export * from './<builderDir>/<builderFileName without .ets>';`
    pub fn index_export_line(&self) -> String {
        let stem = self
            .builder_file_name
            .strip_suffix(".ets")
            .unwrap_or(&self.builder_file_name);
        format!(
            "export * from './{}/{}';",
            self.builder_dir.trim_end_matches('/'),
            stem
        )
    }

    /// Absolute source path of a `scanFiles` entry.
    pub fn source_path(&self, file: &str) -> PathBuf {
        let mut rel = file.to_string();
        if !rel.ends_with(".ets") {
            rel.push_str(".ets");
        }
        self.module_path.join(rel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_plugin_layout() {
        let cfg = GeneratorConfig {
            module_name: "entry".into(),
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
        assert_eq!(
            cfg.page_source_file(),
            "src/main/ets/auto_router_generated/RouterBuilder.ets"
        );
        assert_eq!(
            cfg.index_export_line(),
            "export * from './src/main/ets/auto_router_generated/RouterBuilder';"
        );
    }

    #[test]
    fn extra_scan_files_are_appended_once() {
        let cfg = GeneratorConfig {
            scan_files: vec!["src/main/ets/pages/A".into()],
            ..Default::default()
        }
        .with_extra_scan_files(" src/main/ets/pages/A , src/main/ets/pages/B,,");
        assert_eq!(
            cfg.scan_files,
            ["src/main/ets/pages/A", "src/main/ets/pages/B"]
        );
    }

    #[test]
    fn source_path_appends_extension_once() {
        let cfg = GeneratorConfig {
            module_path: PathBuf::from("/m"),
            ..Default::default()
        };
        assert_eq!(cfg.source_path("pages/A"), PathBuf::from("/m/pages/A.ets"));
        assert_eq!(
            cfg.source_path("pages/B.ets"),
            PathBuf::from("/m/pages/B.ets")
        );
    }

    #[test]
    fn parses_camel_case_json5() {
        let cfg: GeneratorConfig = json5::from_str(
            r#"{
                // plugin options
                moduleName: "home",
                mainTarget: true,
                annotation: "Route",
                viewKeyword: ["component", "struct"],
                scanFiles: ["src/main/ets/Home"],
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.module_name, "home");
        assert!(cfg.main_target);
        assert_eq!(cfg.lib_name, "autorouter");

        let analyzer = cfg.analyzer_config(AnalyzerConfig::default());
        assert_eq!(analyzer.decorator.name, "Route");
        assert_eq!(analyzer.declaration_keyword, "component");
    }

    #[test]
    fn empty_module_name_is_rejected() {
        assert!(GeneratorConfig::default().validate().is_err());
    }
}
