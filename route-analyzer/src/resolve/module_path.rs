//! Module specifier → source file.
//!
//! - Relative specifiers (`./`, `../`) resolve against the importing file's directory;
//! - Bare specifiers go through the nearest package manifest first, then through module stores
//!   (`oh_modules`, `node_modules`) searched upward;
//! - Every candidate is tried verbatim, then with each configured extension, then as a directory
//!   holding an entry file.

use crate::config::model::AnalyzerConfig;
use crate::errors::ResolveError;
use crate::resolve::manifest::ManifestResolver;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A resolved module file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedModule {
    pub path: PathBuf,
    /// `path` is the entry file of a whole package (its redirects are honoured eagerly).
    pub is_package_entry: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ModuleResolver<'a> {
    cfg: &'a AnalyzerConfig,
    manifests: ManifestResolver<'a>,
}

impl<'a> ModuleResolver<'a> {
    pub fn new(cfg: &'a AnalyzerConfig) -> Self {
        Self {
            cfg,
            manifests: ManifestResolver::new(cfg),
        }
    }

    /// Resolve `specifier` as written in a file living in `base_dir`.
    pub fn resolve(&self, base_dir: &Path, specifier: &str) -> Result<LocatedModule, ResolveError> {
        let not_found = || ResolveError::ModuleNotFound {
            specifier: specifier.to_string(),
            from: base_dir.to_path_buf(),
        };

        if is_relative(specifier) || Path::new(specifier).is_absolute() {
            let path = self.probe(&base_dir.join(specifier)).ok_or_else(not_found)?;
            return Ok(LocatedModule {
                path,
                is_package_entry: false,
            });
        }

        let (package, subpath) = split_package(specifier);
        match self.manifests.package_dir(base_dir, package) {
            Ok(dir) => return self.within_package(&dir, subpath).ok_or_else(not_found),
            Err(err) => debug!(specifier, reason = %err, "Manifest lookup failed; trying module stores"),
        }

        for ancestor in base_dir.ancestors() {
            for store in &self.cfg.module_stores {
                let dir = ancestor.join(store).join(package);
                if dir.is_dir() {
                    if let Some(found) = self.within_package(&dir, subpath) {
                        return Ok(found);
                    }
                }
            }
        }
        Err(not_found())
    }

    fn within_package(&self, dir: &Path, subpath: &str) -> Option<LocatedModule> {
        if subpath.is_empty() {
            return self.manifests.entry_file(dir).map(|path| LocatedModule {
                path,
                is_package_entry: true,
            });
        }
        self.probe(&dir.join(subpath)).map(|path| LocatedModule {
            path,
            is_package_entry: false,
        })
    }

    /// First readable file for `candidate`.
    pub fn probe(&self, candidate: &Path) -> Option<PathBuf> {
        if candidate.is_file() {
            return Some(candidate.to_path_buf());
        }
        for ext in &self.cfg.source_extensions {
            let with_ext = PathBuf::from(format!("{}{ext}", candidate.display()));
            if with_ext.is_file() {
                return Some(with_ext);
            }
        }
        if candidate.is_dir() {
            return self
                .cfg
                .entry_file_names()
                .into_iter()
                .map(|name| candidate.join(name))
                .find(|p| p.is_file());
        }
        None
    }
}

fn is_relative(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// `@scope/name/sub/path` → (`@scope/name`, `sub/path`); `name/sub` → (`name`, `sub`).
fn split_package(specifier: &str) -> (&str, &str) {
    let mut seps = specifier.match_indices('/').map(|(i, _)| i);
    let cut = if specifier.starts_with('@') {
        seps.nth(1)
    } else {
        seps.next()
    };
    match cut {
        Some(i) => (&specifier[..i], &specifier[i + 1..]),
        None => (specifier, ""),
    }
}
