//! Import/export binding table of one file.
//!
//! Built while that file is walked and read-only afterwards. Tables are never shared or merged
//! across files: every nested scan starts with an empty one.

use crate::syntax::events::{ExportedName, ImportedName};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportKind {
    Default,
    Named { imported: String },
    Namespace,
}

/// A locally bound name and the module specifier it was imported from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    pub local: String,
    pub kind: ImportKind,
    /// Specifier exactly as written, e.g. `./constants` or `@app/common`.
    pub specifier: String,
}

impl ImportBinding {
    /// Name the binding has inside the module it comes from.
    pub fn exported_name(&self) -> &str {
        match &self.kind {
            ImportKind::Named { imported } => imported,
            ImportKind::Default | ImportKind::Namespace => &self.local,
        }
    }

    pub fn is_namespace(&self) -> bool {
        self.kind == ImportKind::Namespace
    }
}

/// `export { original as exported } from 'specifier'`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRedirect {
    pub exported: String,
    pub original: String,
    pub specifier: String,
}

#[derive(Debug, Default, Clone)]
pub struct BindingTable {
    imports: HashMap<String, ImportBinding>,
    redirects: HashMap<String, ExportRedirect>,
    wildcard_redirects: Vec<String>,
}

impl BindingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every name bound by one import statement.
    pub fn record_import(&mut self, names: &[ImportedName], specifier: &str) {
        for name in names {
            let kind = match name {
                ImportedName::Default(_) => ImportKind::Default,
                ImportedName::Named { imported, .. } => ImportKind::Named {
                    imported: imported.clone(),
                },
                ImportedName::Namespace(_) => ImportKind::Namespace,
            };
            self.imports.insert(
                name.local().to_string(),
                ImportBinding {
                    local: name.local().to_string(),
                    kind,
                    specifier: specifier.to_string(),
                },
            );
        }
    }

    pub fn record_export_redirect(&mut self, name: &ExportedName, specifier: &str) {
        self.redirects.insert(
            name.exported.clone(),
            ExportRedirect {
                exported: name.exported.clone(),
                original: name.original.clone(),
                specifier: specifier.to_string(),
            },
        );
    }

    /// `export * from 'specifier'`
    pub fn record_wildcard_redirect(&mut self, specifier: &str) {
        if !self.wildcard_redirects.iter().any(|s| s == specifier) {
            self.wildcard_redirects.push(specifier.to_string());
        }
    }

    pub fn lookup_import(&self, local: &str) -> Option<&ImportBinding> {
        self.imports.get(local)
    }

    pub fn lookup_export_redirect(&self, exported: &str) -> Option<&ExportRedirect> {
        self.redirects.get(exported)
    }

    /// Wildcard re-exports in source order.
    pub fn wildcard_redirects(&self) -> &[String] {
        &self.wildcard_redirects
    }
}
