//! Directive handed to a nested file scan.
//!
//! When the constant resolver needs one value from another module it scans that module with a
//! [`ScanQuery`]. The nested visitor fills the output slots and the resolver reads them back.

use crate::model::Literal;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanQuery {
    /// Class/type that owns the member, or the constant itself when `attr_name` is `None`.
    pub class_name: String,
    /// Static member to read.
    pub attr_name: Option<String>,
    /// The target is a package entry file: stop at the first `export { class_name } from ...`
    /// and report where it points instead of scanning further.
    pub indexed: bool,
    /// Output: module a package entry redirects `class_name` to.
    pub resolved_path: Option<PathBuf>,
    /// Output: literal found for the query.
    pub resolved_value: Option<Literal>,
    /// Output: a declaration matched but its initializer is not a literal.
    pub declared_non_literal: bool,
}

impl ScanQuery {
    /// Query for a top-level `const NAME = ...`.
    pub fn constant(name: impl Into<String>) -> Self {
        Self {
            class_name: name.into(),
            ..Self::default()
        }
    }

    /// Query for `class_name.attr_name`: a static field, or a property of an exported object
    /// literal.
    pub fn member(class_name: impl Into<String>, attr_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            attr_name: Some(attr_name.into()),
            ..Self::default()
        }
    }

    pub fn indexed(mut self, indexed: bool) -> Self {
        self.indexed = indexed;
        self
    }

    /// Symbol the query is ultimately after, for diagnostics.
    pub fn describe(&self) -> String {
        match &self.attr_name {
            Some(attr) => format!("{}.{}", self.class_name, attr),
            None => self.class_name.clone(),
        }
    }

    /// Same question, asked of the module `class_name` was re-exported from.
    pub(crate) fn redirected(&self, original: &str, indexed: bool) -> Self {
        Self {
            class_name: original.to_string(),
            attr_name: self.attr_name.clone(),
            indexed,
            ..Self::default()
        }
    }
}
