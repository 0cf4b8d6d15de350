//! Symbolic decorator argument → literal.
//!
//! A bare identifier or a `Namespace.MEMBER` access is looked up in the importing file's binding
//! table, its module is located, and that module is scanned with a [`ScanQuery`]. When the module
//! only re-exports the symbol, the redirect is followed into the next module.
//!
//! Every nested scan gets a fresh binding table. The chain of canonical file paths currently
//! being resolved is carried along; re-entering a file on it fails with [`ResolveError::Cycle`],
//! and chains longer than `max_resolve_depth` fail with [`ResolveError::DepthExceeded`].

use crate::analysis::bindings::BindingTable;
use crate::analysis::visitor::{FileScan, scan_file};
use crate::config::model::AnalyzerConfig;
use crate::errors::ResolveError;
use crate::model::{Literal, ScanQuery};
use crate::resolve::module_path::{LocatedModule, ModuleResolver};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reference written as a decorator argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolRef<'r> {
    /// `NAME`
    Ident(&'r str),
    /// `Namespace.MEMBER`
    Member { object: &'r str, member: &'r str },
}

#[derive(Debug, Clone, Copy)]
pub struct ConstantResolver<'a> {
    cfg: &'a AnalyzerConfig,
    modules: ModuleResolver<'a>,
}

impl<'a> ConstantResolver<'a> {
    pub fn new(cfg: &'a AnalyzerConfig) -> Self {
        Self {
            cfg,
            modules: ModuleResolver::new(cfg),
        }
    }

    pub fn modules(&self) -> &ModuleResolver<'a> {
        &self.modules
    }

    /// Resolve an imported reference seen in `current_file`.
    ///
    /// `chain` holds the canonical paths of the files already being resolved, including
    /// `current_file` itself.
    pub fn resolve_symbol(
        &self,
        current_file: &Path,
        bindings: &BindingTable,
        reference: SymbolRef<'_>,
        chain: &[PathBuf],
    ) -> Result<Literal, ResolveError> {
        let local = match reference {
            SymbolRef::Ident(name) => name,
            SymbolRef::Member { object, .. } => object,
        };
        let binding = bindings
            .lookup_import(local)
            .ok_or_else(|| ResolveError::Unbound(local.to_string()))?;

        let query = match reference {
            // `import * as NS` bound to a plain identifier is a module object, not a literal.
            SymbolRef::Ident(name) if binding.is_namespace() => {
                return Err(ResolveError::NotLiteral(name.to_string()));
            }
            SymbolRef::Ident(_) => ScanQuery::constant(binding.exported_name()),
            // `NS.MEMBER` names the module's own export `MEMBER`, so redirects are keyed by it.
            SymbolRef::Member { member, .. } if binding.is_namespace() => {
                ScanQuery::constant(member)
            }
            SymbolRef::Member { member, .. } => ScanQuery::member(binding.exported_name(), member),
        };

        let base_dir = current_file.parent().unwrap_or_else(|| Path::new("."));
        let located = self.modules.resolve(base_dir, &binding.specifier)?;
        self.trace(|| {
            debug!(
                symbol = %query.describe(),
                specifier = %binding.specifier,
                target = %located.path.display(),
                "Resolving imported symbol"
            )
        });

        self.query_module(
            &located.path,
            query.indexed(located.is_package_entry),
            chain,
        )
    }

    /// Scan `path` for `query`, following export redirects from there on.
    pub fn query_module(
        &self,
        path: &Path,
        query: ScanQuery,
        chain: &[PathBuf],
    ) -> Result<Literal, ResolveError> {
        let key = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if chain.contains(&key) {
            return Err(ResolveError::Cycle(key));
        }
        if chain.len() > self.cfg.max_resolve_depth {
            return Err(ResolveError::DepthExceeded(self.cfg.max_resolve_depth));
        }

        let mut next_chain = chain.to_vec();
        next_chain.push(key.clone());

        let symbol = query.describe();
        let FileScan {
            bindings, query, ..
        } = scan_file(self.cfg, &key, Some(query), next_chain.clone()).map_err(|err| {
            ResolveError::Unreadable {
                path: key.clone(),
                reason: err.to_string(),
            }
        })?;
        let Some(query) = query else {
            return Err(ResolveError::NotFound { symbol, file: key });
        };

        if let Some(value) = query.resolved_value {
            self.trace(|| debug!(%symbol, %value, file = %key.display(), "Resolved"));
            return Ok(value);
        }
        if query.declared_non_literal {
            return Err(ResolveError::NotLiteral(symbol));
        }

        let base_dir = key.parent().unwrap_or_else(|| Path::new("."));

        if let Some(redirect) = bindings.lookup_export_redirect(&query.class_name) {
            // A package entry scan already located the redirect target.
            let located = match &query.resolved_path {
                Some(path) => LocatedModule {
                    path: path.clone(),
                    is_package_entry: false,
                },
                None => self.modules.resolve(base_dir, &redirect.specifier)?,
            };
            let target = located.path;
            self.trace(|| {
                debug!(
                    %symbol,
                    from = %key.display(),
                    to = %target.display(),
                    "Following export redirect"
                )
            });
            return self.query_module(
                &target,
                query.redirected(&redirect.original, located.is_package_entry),
                &next_chain,
            );
        }

        for specifier in bindings.wildcard_redirects() {
            let Ok(located) = self.modules.resolve(base_dir, specifier) else {
                continue;
            };
            let next = query.redirected(&query.class_name, located.is_package_entry);
            match self.query_module(&located.path, next, &next_chain) {
                Ok(value) => return Ok(value),
                Err(err) => self.trace(|| {
                    debug!(%symbol, %specifier, reason = %err, "Wildcard re-export did not resolve")
                }),
            }
        }

        Err(ResolveError::NotFound { symbol, file: key })
    }

    fn trace(&self, log: impl FnOnce()) {
        if self.cfg.trace_resolution {
            log();
        }
    }
}
