//! `oh-package.json5` handling.
//!
//! Only the fields the resolver reads are modelled: `main`, `dependencies` and
//! `devDependencies`. Dependency values are either registry versions or local paths carrying the
//! configured prefix (`file:../common`).

use crate::config::model::AnalyzerConfig;
use crate::errors::{AnalyzerError, ResolveError};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    /// Declared entry file, relative to the package directory.
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, Value>,
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, Value>,
}

/// Where a dependency comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestDependency {
    /// Registry version string, installed into a module store.
    Registry(String),
    /// Local path relative to the manifest directory (prefix already stripped).
    Local(PathBuf),
}

impl ManifestDependency {
    pub fn parse(raw: &str, local_prefix: &str) -> Self {
        match raw.strip_prefix(local_prefix) {
            Some(rest) => ManifestDependency::Local(PathBuf::from(rest.trim())),
            None => ManifestDependency::Registry(raw.to_string()),
        }
    }
}

impl PackageManifest {
    /// Read `<dir>/<file_name>`. A missing manifest is `Ok(None)`, not an error.
    pub fn load(dir: &Path, file_name: &str) -> Result<Option<Self>, AnalyzerError> {
        let path = dir.join(file_name);
        let text = match fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(AnalyzerError::Io { path, source }),
        };
        json5::from_str(&text)
            .map(Some)
            .map_err(|source| AnalyzerError::Json5 { path, source })
    }

    /// Raw dependency value, runtime dependencies first.
    pub fn dependency(&self, package: &str) -> Option<&str> {
        self.dependencies
            .get(package)
            .or_else(|| self.dev_dependencies.get(package))
            .and_then(Value::as_str)
    }
}

/// Resolves bare package names through the nearest manifest.
#[derive(Debug, Clone, Copy)]
pub struct ManifestResolver<'a> {
    cfg: &'a AnalyzerConfig,
}

impl<'a> ManifestResolver<'a> {
    pub fn new(cfg: &'a AnalyzerConfig) -> Self {
        Self { cfg }
    }

    /// Nearest directory at or above `start` holding a manifest.
    pub fn find_manifest_dir(&self, start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .find(|dir| dir.join(&self.cfg.manifest_file_name).is_file())
            .map(Path::to_path_buf)
    }

    /// Directory of `package` as declared by the nearest manifest above `from_dir`.
    pub fn package_dir(&self, from_dir: &Path, package: &str) -> Result<PathBuf, ResolveError> {
        let manifest_dir = self
            .find_manifest_dir(from_dir)
            .ok_or_else(|| ResolveError::NoManifest(from_dir.to_path_buf()))?;
        let manifest_path = manifest_dir.join(&self.cfg.manifest_file_name);

        let manifest = match PackageManifest::load(&manifest_dir, &self.cfg.manifest_file_name) {
            Ok(Some(m)) => m,
            Ok(None) => return Err(ResolveError::NoManifest(manifest_dir)),
            Err(err) => {
                warn!(path = %manifest_path.display(), error = %err, "Unreadable manifest");
                return Err(ResolveError::Unreadable {
                    path: manifest_path,
                    reason: err.to_string(),
                });
            }
        };

        let raw = manifest
            .dependency(package)
            .ok_or_else(|| ResolveError::DependencyNotListed {
                package: package.to_string(),
                manifest: manifest_path.clone(),
            })?;

        let dir = match ManifestDependency::parse(raw, &self.cfg.local_dependency_prefix) {
            ManifestDependency::Local(rel) => manifest_dir.join(rel),
            ManifestDependency::Registry(version) => {
                let store = self
                    .cfg
                    .module_stores
                    .first()
                    .map(String::as_str)
                    .unwrap_or("oh_modules");
                debug!(package, %version, "Registry dependency; looking in module store");
                manifest_dir.join(store).join(package)
            }
        };

        if dir.is_dir() {
            Ok(dunce::canonicalize(&dir).unwrap_or(dir))
        } else {
            Err(ResolveError::ModuleNotFound {
                specifier: package.to_string(),
                from: manifest_dir,
            })
        }
    }

    /// Entry file of `package` as seen from `from_dir`.
    pub fn resolve_bare_package(
        &self,
        from_dir: &Path,
        package: &str,
    ) -> Result<PathBuf, ResolveError> {
        let dir = self.package_dir(from_dir, package)?;
        self.entry_file(&dir)
            .ok_or_else(|| ResolveError::ModuleNotFound {
                specifier: package.to_string(),
                from: dir,
            })
    }

    /// The package's own `main` when declared and present, otherwise `Index` + a source extension.
    pub fn entry_file(&self, package_dir: &Path) -> Option<PathBuf> {
        if let Ok(Some(own)) = PackageManifest::load(package_dir, &self.cfg.manifest_file_name) {
            if let Some(main) = own.main.filter(|m| !m.trim().is_empty()) {
                let declared = package_dir.join(main);
                if declared.is_file() {
                    return Some(declared);
                }
                for ext in &self.cfg.source_extensions {
                    let candidate = PathBuf::from(format!("{}{ext}", declared.display()));
                    if candidate.is_file() {
                        return Some(candidate);
                    }
                }
            }
        }
        self.cfg
            .entry_file_names()
            .into_iter()
            .map(|name| package_dir.join(name))
            .find(|p| p.is_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(path: &Path, text: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    #[test]
    fn classifies_dependency_values() {
        assert_eq!(
            ManifestDependency::parse("file:../common", "file:"),
            ManifestDependency::Local(PathBuf::from("../common"))
        );
        assert_eq!(
            ManifestDependency::parse("^1.0.2", "file:"),
            ManifestDependency::Registry("^1.0.2".into())
        );
    }

    #[test]
    fn parses_json5_with_comments() {
        let tmp = TempDir::new().unwrap();
        write(
            &tmp.path().join("oh-package.json5"),
            "{\n  // module manifest\n  name: 'home',\n  dependencies: {\n    '@app/common': 'file:../common',\n  },\n}\n",
        );
        let manifest = PackageManifest::load(tmp.path(), "oh-package.json5")
            .unwrap()
            .unwrap();
        assert_eq!(manifest.name.as_deref(), Some("home"));
        assert_eq!(manifest.dependency("@app/common"), Some("file:../common"));
        assert_eq!(manifest.dependency("missing"), None);
    }

    #[test]
    fn missing_manifest_is_not_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(
            PackageManifest::load(tmp.path(), "oh-package.json5")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn local_dependency_resolves_to_index_entry() {
        let tmp = TempDir::new().unwrap();
        let home = tmp.path().join("feature/home");
        write(
            &home.join("oh-package.json5"),
            "{ dependencies: { common: 'file:../../common' } }",
        );
        write(&tmp.path().join("common/Index.ets"), "export {}\n");
        fs::create_dir_all(home.join("src/main/ets")).unwrap();

        let cfg = AnalyzerConfig::default();
        let resolver = ManifestResolver::new(&cfg);
        let entry = resolver
            .resolve_bare_package(&home.join("src/main/ets"), "common")
            .unwrap();
        assert!(entry.ends_with("common/Index.ets"));

        let err = resolver
            .resolve_bare_package(&home, "unknown")
            .unwrap_err();
        assert!(matches!(err, ResolveError::DependencyNotListed { .. }));
    }

    #[test]
    fn declared_main_wins_over_index() {
        let tmp = TempDir::new().unwrap();
        write(
            &tmp.path().join("oh-package.json5"),
            "{ dependencies: { lib: 'file:./lib' } }",
        );
        write(&tmp.path().join("lib/oh-package.json5"), "{ main: 'src/Entry' }");
        write(&tmp.path().join("lib/src/Entry.ets"), "");
        write(&tmp.path().join("lib/Index.ets"), "");

        let cfg = AnalyzerConfig::default();
        let entry = ManifestResolver::new(&cfg)
            .resolve_bare_package(tmp.path(), "lib")
            .unwrap();
        assert!(entry.ends_with("lib/src/Entry.ets"));
    }

    #[test]
    fn no_manifest_above_directory() {
        let tmp = TempDir::new().unwrap();
        let cfg = AnalyzerConfig::default();
        let err = ManifestResolver::new(&cfg)
            .resolve_bare_package(tmp.path(), "pkg")
            .unwrap_err();
        assert!(matches!(err, ResolveError::NoManifest(_)));
    }
}
