//! Per-file analysis: binding tables and the decorator visitor.

pub mod bindings;
pub mod visitor;

pub use bindings::{BindingTable, ExportRedirect, ImportBinding, ImportKind};
