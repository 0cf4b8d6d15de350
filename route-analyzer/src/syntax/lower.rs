//! Lowering of the tree-sitter tree into [`SyntaxEvent`]s.
//!
//! The walk is a single pre-order pass over the top-level statements:
//! - `import` / `export ... from` statements become binding events;
//! - top-level `const` / `let` / `var` declarators become [`SyntaxEvent::Constant`];
//! - class declarations emit [`SyntaxEvent::TypeDeclaration`] first and their decorators after it,
//!   even when tree-sitter attaches the decorators to the enclosing `export` statement;
//! - enums become a [`SyntaxEvent::TypeDeclaration`] whose members are the static fields;
//! - everything else is descended into, decorators are emitted where they appear and bare word
//!   leaves become [`SyntaxEvent::Identifier`].
//!
//! ArkTS `struct` is not TypeScript. Error recovery leaves such a declaration as loose tokens
//! (decorator, then the `struct` word, then the name), which is exactly what the visitor expects.

use crate::errors::Result;
use crate::model::Literal;
use crate::syntax::events::{
    ConstantDecl, DecoratorCall, ExportFrom, ExportedName, Expr, FieldDecl, ImportDecl,
    ImportedName, Property, SyntaxEvent, TypeDecl,
};
use crate::syntax::traits::SyntaxSink;
use std::path::Path;
use tree_sitter::{Node, Tree};
use tracing::warn;

/// Walk `tree` and deliver its events to `sink`.
///
/// A failure while lowering one node is logged and the walk moves on to the next sibling.
pub fn walk_tree(tree: &Tree, code: &str, path: &Path, sink: &mut dyn SyntaxSink) {
    let mut lowerer = Lowerer {
        code: code.as_bytes(),
        path,
        sink,
        stopped: false,
    };
    lowerer.lower_children(tree.root_node(), true);
}

struct Lowerer<'c, 's> {
    code: &'c [u8],
    path: &'c Path,
    sink: &'s mut dyn SyntaxSink,
    stopped: bool,
}

impl Lowerer<'_, '_> {
    fn emit(&mut self, event: SyntaxEvent) {
        if !self.stopped && self.sink.on_event(event).is_break() {
            self.stopped = true;
        }
    }

    fn lower_children(&mut self, node: Node, top_level: bool) {
        let children = children_of(node);
        let mut i = 0;
        while i < children.len() && !self.stopped {
            let child = children[i];
            // Recovery sometimes detaches `@` from the decorator expression.
            if child.kind() == "@" {
                if let Some(next) = children.get(i + 1).copied() {
                    if matches!(
                        next.kind(),
                        "call_expression" | "identifier" | "member_expression"
                    ) {
                        if let Err(err) = self.lower_decorator_expr(next) {
                            self.report(next, &err);
                        }
                        i += 2;
                        continue;
                    }
                }
            }
            if let Err(err) = self.lower_node(child, top_level) {
                self.report(child, &err);
            }
            i += 1;
        }
    }

    fn report(&self, node: Node, err: &crate::errors::AnalyzerError) {
        warn!(
            path = %self.path.display(),
            kind = node.kind(),
            line = node.start_position().row + 1,
            error = %err,
            "Failed to lower node; skipping"
        );
    }

    fn lower_node(&mut self, node: Node, top_level: bool) -> Result<()> {
        match node.kind() {
            "import_statement" => self.lower_import(node),
            "export_statement" => self.lower_export(node, top_level),
            "class_declaration" | "abstract_class_declaration" => self.lower_class(node, &[]),
            "enum_declaration" => self.lower_enum(node),
            "lexical_declaration" | "variable_declaration" if top_level => {
                self.lower_variables(node)
            }
            "decorator" => self.lower_decorator(node),
            "comment" => Ok(()),
            kind if node.child_count() == 0 => {
                let word = self.text(node)?;
                if kind.ends_with("identifier") || (node.is_error() && is_word(&word)) {
                    self.emit(SyntaxEvent::Identifier(word));
                }
                Ok(())
            }
            kind => {
                // Statements recovered inside an ERROR node are still top-level statements.
                self.lower_children(node, top_level && kind == "ERROR");
                Ok(())
            }
        }
    }

    fn lower_import(&mut self, node: Node) -> Result<()> {
        let Some(source) = node.child_by_field_name("source") else {
            return Ok(());
        };
        let source = self.string_value(source)?;

        let mut names = Vec::new();
        for clause in children_of(node) {
            if clause.kind() != "import_clause" {
                continue;
            }
            for part in named_children_of(clause) {
                match part.kind() {
                    // import X from 'm'
                    "identifier" => names.push(ImportedName::Default(self.text(part)?)),
                    // import * as N from 'm'
                    "namespace_import" => {
                        if let Some(id) = named_children_of(part)
                            .into_iter()
                            .find(|n| n.kind() == "identifier")
                        {
                            names.push(ImportedName::Namespace(self.text(id)?));
                        }
                    }
                    // import { A, B as C } from 'm'
                    "named_imports" => {
                        for spec in named_children_of(part) {
                            if spec.kind() != "import_specifier" {
                                continue;
                            }
                            let Some(name) = spec.child_by_field_name("name") else {
                                continue;
                            };
                            let imported = self.name_text(name)?;
                            let local = match spec.child_by_field_name("alias") {
                                Some(alias) => self.name_text(alias)?,
                                None => imported.clone(),
                            };
                            names.push(ImportedName::Named { imported, local });
                        }
                    }
                    _ => {}
                }
            }
        }

        if !names.is_empty() {
            self.emit(SyntaxEvent::Import(ImportDecl { names, source }));
        }
        Ok(())
    }

    fn lower_export(&mut self, node: Node, top_level: bool) -> Result<()> {
        let decorators = decorators_of(node);

        if let Some(source) = node.child_by_field_name("source") {
            let source = self.string_value(source)?;
            let children = children_of(node);
            if let Some(clause) = children.iter().find(|c| c.kind() == "export_clause") {
                let mut names = Vec::new();
                for spec in named_children_of(*clause) {
                    if spec.kind() != "export_specifier" {
                        continue;
                    }
                    let Some(name) = spec.child_by_field_name("name") else {
                        continue;
                    };
                    let original = self.name_text(name)?;
                    let exported = match spec.child_by_field_name("alias") {
                        Some(alias) => self.name_text(alias)?,
                        None => original.clone(),
                    };
                    names.push(ExportedName { original, exported });
                }
                if !names.is_empty() {
                    self.emit(SyntaxEvent::ExportFrom(ExportFrom::Named { names, source }));
                }
            } else if children.iter().any(|c| c.kind() == "*")
                && !children.iter().any(|c| c.kind() == "namespace_export")
            {
                self.emit(SyntaxEvent::ExportFrom(ExportFrom::All { source }));
            }
            return Ok(());
        }

        if let Some(decl) = node.child_by_field_name("declaration") {
            if matches!(
                decl.kind(),
                "class_declaration" | "abstract_class_declaration"
            ) {
                return self.lower_class(decl, &decorators);
            }
            for d in decorators {
                self.lower_decorator(d)?;
            }
            return self.lower_node(decl, top_level);
        }

        self.lower_children(node, top_level);
        Ok(())
    }

    /// Form B: the name is known before any decorator is seen.
    fn lower_class(&mut self, node: Node, outer_decorators: &[Node]) -> Result<()> {
        let Some(name) = node.child_by_field_name("name") else {
            self.lower_children(node, false);
            return Ok(());
        };
        let name = self.text(name)?;

        let mut static_fields = Vec::new();
        if let Some(body) = node.child_by_field_name("body") {
            for member in named_children_of(body) {
                if member.kind() != "public_field_definition"
                    || !children_of(member).iter().any(|c| c.kind() == "static")
                {
                    continue;
                }
                let Some(field) = member.child_by_field_name("name") else {
                    continue;
                };
                let value = match member.child_by_field_name("value") {
                    Some(v) => self.lower_expr(v)?,
                    None => Expr::Unsupported("uninitialized".into()),
                };
                static_fields.push(FieldDecl {
                    name: self.name_text(field)?,
                    value,
                });
            }
        }

        self.emit(SyntaxEvent::TypeDeclaration(TypeDecl {
            name,
            static_fields,
        }));
        let own = decorators_of(node);
        for d in outer_decorators.iter().chain(own.iter()) {
            if self.stopped {
                break;
            }
            if let Err(err) = self.lower_decorator(*d) {
                self.report(*d, &err);
            }
        }
        self.emit(SyntaxEvent::TypeDeclarationEnd);
        Ok(())
    }

    fn lower_enum(&mut self, node: Node) -> Result<()> {
        let Some(name) = node.child_by_field_name("name") else {
            return Ok(());
        };
        let name = self.text(name)?;

        let mut static_fields = Vec::new();
        if let Some(body) = node.child_by_field_name("body") {
            for member in named_children_of(body) {
                let (field, value) = match member.kind() {
                    "enum_assignment" => {
                        let Some(field) = member.child_by_field_name("name") else {
                            continue;
                        };
                        let value = match member.child_by_field_name("value") {
                            Some(v) => self.lower_expr(v)?,
                            None => Expr::Unsupported("uninitialized".into()),
                        };
                        (field, value)
                    }
                    // numeric auto value
                    "property_identifier" | "string" => {
                        (member, Expr::Unsupported("enum_member".into()))
                    }
                    _ => continue,
                };
                static_fields.push(FieldDecl {
                    name: self.name_text(field)?,
                    value,
                });
            }
        }

        self.emit(SyntaxEvent::TypeDeclaration(TypeDecl {
            name,
            static_fields,
        }));
        self.emit(SyntaxEvent::TypeDeclarationEnd);
        Ok(())
    }

    fn lower_variables(&mut self, node: Node) -> Result<()> {
        for decl in named_children_of(node) {
            if decl.kind() != "variable_declarator" {
                continue;
            }
            let Some(name) = decl.child_by_field_name("name") else {
                continue;
            };
            // destructuring patterns never hold a route constant
            if name.kind() != "identifier" {
                continue;
            }
            let value = match decl.child_by_field_name("value") {
                Some(v) => self.lower_expr(v)?,
                None => Expr::Unsupported("uninitialized".into()),
            };
            self.emit(SyntaxEvent::Constant(ConstantDecl {
                name: self.text(name)?,
                value,
            }));
        }
        Ok(())
    }

    fn lower_decorator(&mut self, node: Node) -> Result<()> {
        match named_children_of(node).into_iter().find(|n| !n.is_extra()) {
            Some(expr) => self.lower_decorator_expr(expr),
            None => Ok(()),
        }
    }

    fn lower_decorator_expr(&mut self, expr: Node) -> Result<()> {
        let call = if expr.kind() == "call_expression" {
            let callee = match expr.child_by_field_name("function") {
                Some(f) => self.text(f)?,
                None => String::new(),
            };
            let mut arguments = Vec::new();
            if let Some(list) = expr.child_by_field_name("arguments") {
                for arg in named_children_of(list) {
                    if !arg.is_extra() {
                        arguments.push(self.lower_expr(arg)?);
                    }
                }
            }
            DecoratorCall {
                callee,
                arguments: Some(arguments),
            }
        } else {
            DecoratorCall {
                callee: self.text(expr)?,
                arguments: None,
            }
        };
        self.emit(SyntaxEvent::Decorator(call));
        Ok(())
    }

    fn lower_expr(&self, node: Node) -> Result<Expr> {
        Ok(match node.kind() {
            "string" => Expr::Literal(Literal::Str(self.string_value(node)?)),
            "template_string" => {
                if children_of(node)
                    .iter()
                    .any(|c| c.kind() == "template_substitution")
                {
                    Expr::Unsupported("template_substitution".into())
                } else {
                    Expr::Literal(Literal::Str(self.string_value(node)?))
                }
            }
            "true" => Expr::Literal(Literal::Bool(true)),
            "false" => Expr::Literal(Literal::Bool(false)),
            "identifier" => Expr::Ident(self.text(node)?),
            "member_expression" => {
                match (
                    node.child_by_field_name("object"),
                    node.child_by_field_name("property"),
                ) {
                    (Some(object), Some(property))
                        if object.kind() == "identifier"
                            && property.kind() == "property_identifier" =>
                    {
                        Expr::Member {
                            object: self.text(object)?,
                            member: self.text(property)?,
                        }
                    }
                    _ => Expr::Unsupported("member_expression".into()),
                }
            }
            "object" => {
                let mut props = Vec::new();
                for prop in named_children_of(node) {
                    match prop.kind() {
                        "pair" => {
                            let (Some(key), Some(value)) = (
                                prop.child_by_field_name("key"),
                                prop.child_by_field_name("value"),
                            ) else {
                                continue;
                            };
                            props.push(Property {
                                key: self.name_text(key)?,
                                value: self.lower_expr(value)?,
                            });
                        }
                        "shorthand_property_identifier" => {
                            let name = self.text(prop)?;
                            props.push(Property {
                                key: name.clone(),
                                value: Expr::Ident(name),
                            });
                        }
                        _ => {}
                    }
                }
                Expr::Object(props)
            }
            "parenthesized_expression"
            | "as_expression"
            | "satisfies_expression"
            | "non_null_expression" => {
                match named_children_of(node).into_iter().find(|n| !n.is_extra()) {
                    Some(inner) => self.lower_expr(inner)?,
                    None => Expr::Unsupported(node.kind().into()),
                }
            }
            other => Expr::Unsupported(other.into()),
        })
    }

    fn text(&self, node: Node) -> Result<String> {
        Ok(node.utf8_text(self.code)?.to_string())
    }

    /// Identifier text, or the unquoted value when the name is written as a string.
    fn name_text(&self, node: Node) -> Result<String> {
        if node.kind() == "string" {
            self.string_value(node)
        } else {
            self.text(node)
        }
    }

    /// Contents of a `string` or `template_string` node with escapes decoded.
    fn string_value(&self, node: Node) -> Result<String> {
        let mut out = String::new();
        for part in named_children_of(node) {
            match part.kind() {
                "string_fragment" => out.push_str(part.utf8_text(self.code)?),
                "escape_sequence" => out.push_str(&unescape(part.utf8_text(self.code)?)),
                _ => {}
            }
        }
        Ok(out)
    }
}

fn children_of<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut w = node.walk();
    node.children(&mut w).collect()
}

fn named_children_of<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut w = node.walk();
    node.named_children(&mut w).collect()
}

fn decorators_of<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut w = node.walk();
    node.children_by_field_name("decorator", &mut w).collect()
}

fn is_word(text: &str) -> bool {
    let mut chars = text.chars();
    matches!(chars.next(), Some(c) if c.is_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}

fn unescape(seq: &str) -> String {
    match seq {
        "\\n" => "\n".into(),
        "\\t" => "\t".into(),
        "\\r" => "\r".into(),
        "\\0" => "\0".into(),
        _ => seq.strip_prefix('\\').unwrap_or(seq).to_string(),
    }
}
