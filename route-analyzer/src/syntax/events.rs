//! Closed set of syntax events the visitor understands.

use crate::model::Literal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxEvent {
    Import(ImportDecl),
    ExportFrom(ExportFrom),
    /// Top-level `const` / `let` / `var` declarator.
    Constant(ConstantDecl),
    /// Class-like declaration (Form B) or enum. Its decorators follow as separate events.
    TypeDeclaration(TypeDecl),
    /// Emitted after the decorators of the preceding [`SyntaxEvent::TypeDeclaration`].
    TypeDeclarationEnd,
    Decorator(DecoratorCall),
    /// Bare word outside any of the above, e.g. the loose `struct` and name of a Form-A
    /// declaration.
    Identifier(String),
}

/// `import ... from 'source'`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    pub names: Vec<ImportedName>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportedName {
    /// `import X from 'm'`
    Default(String),
    /// `import { imported as local } from 'm'`
    Named { imported: String, local: String },
    /// `import * as N from 'm'`
    Namespace(String),
}

impl ImportedName {
    /// Name bound in the importing file.
    pub fn local(&self) -> &str {
        match self {
            ImportedName::Default(n) | ImportedName::Namespace(n) => n,
            ImportedName::Named { local, .. } => local,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportFrom {
    /// `export { original as exported } from 'source'`
    Named {
        names: Vec<ExportedName>,
        source: String,
    },
    /// `export * from 'source'`
    All { source: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedName {
    pub original: String,
    pub exported: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantDecl {
    pub name: String,
    pub value: Expr,
}

/// A class with its static fields, or an enum with its members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDecl {
    pub name: String,
    pub static_fields: Vec<FieldDecl>,
}

impl TypeDecl {
    pub fn static_field(&self, name: &str) -> Option<&FieldDecl> {
        self.static_fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub value: Expr,
}

/// `@callee(arguments...)`; `arguments` is `None` for a bare `@callee`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecoratorCall {
    pub callee: String,
    pub arguments: Option<Vec<Expr>>,
}

/// The slice of expression syntax decorator arguments and initializers are lowered to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(Literal),
    Ident(String),
    Member { object: String, member: String },
    Object(Vec<Property>),
    /// Anything else; carries the tree-sitter node kind.
    Unsupported(String),
}

impl Expr {
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Expr::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    /// Short human-readable form for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Expr::Literal(lit) => lit.to_string(),
            Expr::Ident(name) => name.clone(),
            Expr::Member { object, member } => format!("{object}.{member}"),
            Expr::Object(_) => "{...}".into(),
            Expr::Unsupported(kind) => format!("<{kind}>"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub key: String,
    pub value: Expr,
}
