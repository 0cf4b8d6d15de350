//! Parser front-end.
//!
//! Sources are parsed with the tree-sitter TypeScript grammar and lowered into a closed set of
//! [`events::SyntaxEvent`]s, delivered in source order to a [`traits::SyntaxSink`].

pub mod events;
pub mod lower;
pub mod parse;
pub mod traits;

pub use events::{
    ConstantDecl, DecoratorCall, ExportFrom, ExportedName, Expr, FieldDecl, ImportDecl,
    ImportedName, Property, SyntaxEvent, TypeDecl,
};
pub use traits::SyntaxSink;
