//! Decorator visitor: one forward pass over a file's syntax events.
//!
//! The two declaration forms deliver decorator, keyword and name in opposite orders:
//!
//! ```text
//! Form A (ArkTS struct):  Decorator -> Identifier("struct") -> Identifier(name)
//! Form B (class):         TypeDeclaration(name) -> Decorator -> TypeDeclarationEnd
//! ```
//!
//! A single pending route plus a [`VisitState`] covers both. Imports and re-exports are recorded
//! into the file's [`BindingTable`] as they stream by, so arguments can be resolved eagerly when the
//! decorator is reached.
//!
//! The same visitor answers nested [`ScanQuery`] lookups for the constant resolver. In that mode
//! decorators are skipped and the walk stops as soon as the query is answered.

use crate::analysis::bindings::BindingTable;
use crate::config::model::AnalyzerConfig;
use crate::errors::{AnalyzerError, ResolveError, Result};
use crate::model::{AnalyzeResult, DEFAULT_ROUTE_PARAM_NAME, Literal, ScanQuery};
use crate::resolve::constant::{ConstantResolver, SymbolRef};
use crate::syntax::events::{
    ConstantDecl, DecoratorCall, ExportFrom, Expr, Property, SyntaxEvent, TypeDecl,
};
use crate::syntax::lower::walk_tree;
use crate::syntax::parse::parse_source;
use crate::syntax::traits::SyntaxSink;
use std::collections::HashMap;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Everything one pass over a file produced.
#[derive(Debug, Default)]
pub(crate) struct FileScan {
    pub results: Vec<AnalyzeResult>,
    pub bindings: BindingTable,
    /// The query passed in, with its output slots filled when answered.
    pub query: Option<ScanQuery>,
}

/// Read, parse and visit `path`.
///
/// `chain` is the list of canonical files currently being resolved and must already contain
/// `path`.
pub(crate) fn scan_file(
    cfg: &AnalyzerConfig,
    path: &Path,
    query: Option<ScanQuery>,
    chain: Vec<PathBuf>,
) -> Result<FileScan> {
    let bytes = std::fs::read(path).map_err(|source| AnalyzerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let code = std::str::from_utf8(&bytes)?;
    scan_code(cfg, path, code, query, chain)
}

/// Visit already loaded source text attributed to `path`.
pub(crate) fn scan_code(
    cfg: &AnalyzerConfig,
    path: &Path,
    code: &str,
    query: Option<ScanQuery>,
    chain: Vec<PathBuf>,
) -> Result<FileScan> {
    let tree = parse_source(code)?;
    let mut visitor = DecoratorVisitor::new(cfg, path, query, chain);
    walk_tree(&tree, code, path, &mut visitor);
    Ok(visitor.finish())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Idle,
    /// A Form-A decorator resolved; waiting for the keyword marker and then the name.
    AwaitingName { marker_seen: bool },
    /// Inside a Form-B declaration whose name is already known.
    InDeclaration,
}

/// Route being assembled from a decorator and its declaration.
#[derive(Debug, Clone)]
struct PendingRoute {
    component_name: Option<String>,
    route_name: Option<String>,
    requires_login: bool,
    has_route_param: bool,
    route_param_name: String,
}

impl PendingRoute {
    fn new(component_name: Option<String>) -> Self {
        Self {
            component_name,
            route_name: None,
            requires_login: false,
            has_route_param: false,
            route_param_name: DEFAULT_ROUTE_PARAM_NAME.to_string(),
        }
    }

    fn has_route_name(&self) -> bool {
        self.route_name.as_deref().is_some_and(|n| !n.is_empty())
    }

    fn into_result(self, path: &Path) -> Option<AnalyzeResult> {
        let route_name = self.route_name.filter(|n| !n.is_empty())?;
        let component_name = self.component_name.filter(|n| !n.is_empty())?;
        Some(AnalyzeResult {
            route_name,
            component_name,
            source_file_path: path.to_path_buf(),
            requires_login: self.requires_login,
            has_route_param: self.has_route_param,
            route_param_name: self.route_param_name,
        })
    }
}

struct DecoratorVisitor<'a> {
    cfg: &'a AnalyzerConfig,
    resolver: ConstantResolver<'a>,
    path: &'a Path,
    chain: Vec<PathBuf>,
    bindings: BindingTable,
    /// Top-level constants declared so far.
    constants: HashMap<String, Expr>,
    /// Classes declared so far, for `Class.FIELD` references within the file.
    types: HashMap<String, TypeDecl>,
    query: Option<ScanQuery>,
    state: VisitState,
    pending: Option<PendingRoute>,
    results: Vec<AnalyzeResult>,
}

impl<'a> DecoratorVisitor<'a> {
    fn new(
        cfg: &'a AnalyzerConfig,
        path: &'a Path,
        query: Option<ScanQuery>,
        chain: Vec<PathBuf>,
    ) -> Self {
        Self {
            cfg,
            resolver: ConstantResolver::new(cfg),
            path,
            chain,
            bindings: BindingTable::new(),
            constants: HashMap::new(),
            types: HashMap::new(),
            query,
            state: VisitState::Idle,
            pending: None,
            results: Vec::new(),
        }
    }

    fn finish(self) -> FileScan {
        if matches!(self.state, VisitState::AwaitingName { .. }) {
            debug!(path = %self.path.display(), "Decorator without a declaration name at end of file");
        }
        FileScan {
            results: self.results,
            bindings: self.bindings,
            query: self.query,
        }
    }

    fn on_export_from(&mut self, export: ExportFrom) -> ControlFlow<()> {
        match export {
            ExportFrom::Named { names, source } => {
                for name in &names {
                    self.bindings.record_export_redirect(name, &source);
                }
                let Some(query) = self.query.as_mut() else {
                    return ControlFlow::Continue(());
                };
                if !query.indexed || !names.iter().any(|n| n.exported == query.class_name) {
                    return ControlFlow::Continue(());
                }
                // Package entry: report where the symbol lives and stop here.
                let base_dir = self.path.parent().unwrap_or_else(|| Path::new("."));
                match self.resolver.modules().resolve(base_dir, &source) {
                    Ok(located) => {
                        query.resolved_path = Some(located.path);
                        ControlFlow::Break(())
                    }
                    Err(err) => {
                        debug!(
                            path = %self.path.display(),
                            specifier = %source,
                            reason = %err,
                            "Entry redirect target not found"
                        );
                        ControlFlow::Continue(())
                    }
                }
            }
            ExportFrom::All { source } => {
                self.bindings.record_wildcard_redirect(&source);
                ControlFlow::Continue(())
            }
        }
    }

    fn on_constant(&mut self, decl: ConstantDecl) -> ControlFlow<()> {
        let answer = match self.query.as_ref() {
            Some(query) if query.class_name == decl.name => match &query.attr_name {
                None => Some(self.evaluate(&decl.value)),
                Some(attr) => match &decl.value {
                    // `export const Routes = { HOME: '...' }` read as `Routes.HOME`.
                    Expr::Object(props) => property(props, attr).map(|v| self.evaluate(v)),
                    _ => None,
                },
            },
            _ => None,
        };

        self.constants.insert(decl.name, decl.value);

        match answer {
            Some(outcome) => self.answer(outcome),
            None => ControlFlow::Continue(()),
        }
    }

    fn on_type_declaration(&mut self, decl: TypeDecl) -> ControlFlow<()> {
        let name = decl.name.clone();
        // Registered first so a field may refer to a sibling (`static B = K.A`).
        self.types.insert(name.clone(), decl);

        let answer = match self.query.as_ref() {
            Some(query) if query.class_name == name => query
                .attr_name
                .as_deref()
                .and_then(|attr| self.types.get(&name)?.static_field(attr))
                .map(|field| self.evaluate(&field.value)),
            _ => None,
        };
        if let Some(outcome) = answer {
            return self.answer(outcome);
        }

        if self.query.is_none() {
            if matches!(self.state, VisitState::AwaitingName { .. }) {
                debug!(path = %self.path.display(), class = %name, "Dropping unnamed pending route");
            }
            self.pending = Some(PendingRoute::new(Some(name)));
            self.state = VisitState::InDeclaration;
        }
        ControlFlow::Continue(())
    }

    fn on_type_declaration_end(&mut self) {
        if self.state == VisitState::InDeclaration {
            self.state = VisitState::Idle;
            self.pending = None;
        }
    }

    fn on_decorator(&mut self, call: DecoratorCall) {
        if self.query.is_some() || call.callee != self.cfg.decorator.name {
            return;
        }
        let Some(Expr::Object(props)) = call.arguments.as_ref().and_then(|args| args.first())
        else {
            trace!(path = %self.path.display(), "Route decorator without an object argument");
            return;
        };

        let mut pending = match self.state {
            VisitState::InDeclaration => self
                .pending
                .take()
                .unwrap_or_else(|| PendingRoute::new(None)),
            VisitState::Idle | VisitState::AwaitingName { .. } => PendingRoute::new(None),
        };
        self.apply_arguments(props, &mut pending);

        match self.state {
            VisitState::InDeclaration if pending.has_route_name() => {
                self.finalize(pending);
                self.state = VisitState::Idle;
            }
            VisitState::InDeclaration => self.pending = Some(pending),
            VisitState::Idle | VisitState::AwaitingName { .. } if pending.has_route_name() => {
                self.pending = Some(pending);
                self.state = VisitState::AwaitingName { marker_seen: false };
            }
            VisitState::Idle | VisitState::AwaitingName { .. } => {
                self.pending = None;
                self.state = VisitState::Idle;
            }
        }
    }

    fn on_identifier(&mut self, word: String) {
        let VisitState::AwaitingName { marker_seen } = self.state else {
            return;
        };
        if word == self.cfg.declaration_keyword {
            self.state = VisitState::AwaitingName { marker_seen: true };
            return;
        }
        if !marker_seen {
            return;
        }
        if let Some(mut pending) = self.pending.take() {
            pending.component_name = Some(word);
            self.finalize(pending);
        }
        self.state = VisitState::Idle;
    }

    fn apply_arguments(&self, props: &[Property], pending: &mut PendingRoute) {
        let keys = &self.cfg.decorator;
        for prop in props {
            let value = match self.evaluate(&prop.value) {
                Ok(value) => value,
                Err(err) => {
                    debug!(
                        path = %self.path.display(),
                        key = %prop.key,
                        expr = %prop.value.describe(),
                        reason = %err,
                        "Decorator argument unresolved"
                    );
                    continue;
                }
            };
            let key = prop.key.as_str();
            if key == keys.route_name_key {
                if let Some(s) = value.as_str() {
                    pending.route_name = Some(s.to_string());
                }
            } else if key == keys.login_key {
                if let Some(b) = value.as_bool() {
                    pending.requires_login = b;
                }
            } else if key == keys.has_param_key {
                if let Some(b) = value.as_bool() {
                    pending.has_route_param = b;
                }
            } else if key == keys.param_name_key {
                if let Some(s) = value.as_str() {
                    pending.route_param_name = s.to_string();
                }
            }
        }
    }

    fn finalize(&mut self, pending: PendingRoute) {
        if let Some(result) = pending.into_result(self.path) {
            debug!(
                path = %self.path.display(),
                route = %result.route_name,
                component = %result.component_name,
                "Route declaration found"
            );
            self.results.push(result);
        }
    }

    /// Record the outcome of a matched query declaration and stop the walk.
    fn answer(&mut self, outcome: std::result::Result<Literal, ResolveError>) -> ControlFlow<()> {
        if let Some(query) = self.query.as_mut() {
            match outcome {
                Ok(value) => query.resolved_value = Some(value),
                Err(err) => {
                    debug!(
                        path = %self.path.display(),
                        symbol = %query.describe(),
                        reason = %err,
                        "Declaration is not a literal"
                    );
                    query.declared_non_literal = true;
                }
            }
        }
        ControlFlow::Break(())
    }

    fn evaluate(&self, expr: &Expr) -> std::result::Result<Literal, ResolveError> {
        self.evaluate_with(expr, 0)
    }

    /// Turn an argument or initializer into a literal. Imports take priority over same-file
    /// declarations.
    fn evaluate_with(&self, expr: &Expr, hops: usize) -> std::result::Result<Literal, ResolveError> {
        if hops > self.cfg.max_resolve_depth {
            return Err(ResolveError::DepthExceeded(self.cfg.max_resolve_depth));
        }
        match expr {
            Expr::Literal(lit) => Ok(lit.clone()),
            Expr::Ident(name) => {
                if self.bindings.lookup_import(name).is_some() {
                    return self.resolver.resolve_symbol(
                        self.path,
                        &self.bindings,
                        SymbolRef::Ident(name),
                        &self.chain,
                    );
                }
                let value = self
                    .constants
                    .get(name)
                    .ok_or_else(|| ResolveError::Unbound(name.clone()))?;
                self.evaluate_with(value, hops + 1)
            }
            Expr::Member { object, member } => {
                if self.bindings.lookup_import(object).is_some() {
                    return self.resolver.resolve_symbol(
                        self.path,
                        &self.bindings,
                        SymbolRef::Member { object, member },
                        &self.chain,
                    );
                }
                if let Some(decl) = self.types.get(object) {
                    let field = decl.static_field(member).ok_or_else(|| ResolveError::NotFound {
                        symbol: expr.describe(),
                        file: self.path.to_path_buf(),
                    })?;
                    return self.evaluate_with(&field.value, hops + 1);
                }
                match self.constants.get(object) {
                    Some(Expr::Object(props)) => {
                        let value = property(props, member).ok_or_else(|| {
                            ResolveError::NotFound {
                                symbol: expr.describe(),
                                file: self.path.to_path_buf(),
                            }
                        })?;
                        self.evaluate_with(value, hops + 1)
                    }
                    Some(_) => Err(ResolveError::NotLiteral(expr.describe())),
                    None => Err(ResolveError::Unbound(object.clone())),
                }
            }
            Expr::Object(_) | Expr::Unsupported(_) => {
                Err(ResolveError::NotLiteral(expr.describe()))
            }
        }
    }
}

fn property<'p>(props: &'p [Property], key: &str) -> Option<&'p Expr> {
    props.iter().rev().find(|p| p.key == key).map(|p| &p.value)
}

impl SyntaxSink for DecoratorVisitor<'_> {
    fn on_event(&mut self, event: SyntaxEvent) -> ControlFlow<()> {
        match event {
            SyntaxEvent::Import(import) => {
                self.bindings.record_import(&import.names, &import.source);
            }
            SyntaxEvent::ExportFrom(export) => return self.on_export_from(export),
            SyntaxEvent::Constant(decl) => return self.on_constant(decl),
            SyntaxEvent::TypeDeclaration(decl) => return self.on_type_declaration(decl),
            SyntaxEvent::TypeDeclarationEnd => self.on_type_declaration_end(),
            SyntaxEvent::Decorator(call) => self.on_decorator(call),
            SyntaxEvent::Identifier(word) => self.on_identifier(word),
        }
        ControlFlow::Continue(())
    }
}
