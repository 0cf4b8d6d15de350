//! Tree-sitter setup.

use crate::errors::{AnalyzerError, Result};
use tree_sitter::{Language, Parser, Tree};

/// TypeScript grammar; `.ets` sources go through it too.
#[inline]
pub fn typescript_language() -> Language {
    tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
}

/// Parse source code into a tree-sitter Tree.
pub fn parse_source(code: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&typescript_language())
        .map_err(|_| AnalyzerError::TreeSitterLanguage)?;
    parser.parse(code, None).ok_or(AnalyzerError::TreeSitterParse)
}
