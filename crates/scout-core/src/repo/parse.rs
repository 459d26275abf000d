//! Top-level import/export extraction using the tree-sitter TSX grammar.

use tree_sitter::{Node, Parser};

use super::AnalyzeError;

/// Imports and named exports scraped from one module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleOutline {
    pub imports: Vec<String>,
    pub exports: Vec<String>,
}

/// Reusable parser for `.ts`, `.tsx`, `.js` and `.jsx` sources.
///
/// Every file is parsed with the TSX grammar so JSX is always accepted.
pub struct SourceParser {
    parser: Parser,
}

impl SourceParser {
    pub fn new() -> Result<Self, AnalyzeError> {
        let mut parser = Parser::new();
        let language: tree_sitter::Language = tree_sitter_typescript::LANGUAGE_TSX.into();
        parser.set_language(&language)?;
        Ok(Self { parser })
    }

    /// Parse `source` and collect its outline.
    ///
    /// Returns `None` when the source does not parse cleanly. Callers treat
    /// that as a degraded file, not an error.
    pub fn outline(&mut self, source: &str) -> Option<ModuleOutline> {
        let tree = self.parser.parse(source, None)?;
        let root = tree.root_node();
        if root.has_error() {
            return None;
        }

        let bytes = source.as_bytes();
        let mut outline = ModuleOutline::default();
        let mut cursor = root.walk();
        for node in root.named_children(&mut cursor) {
            match node.kind() {
                "import_statement" => {
                    if let Some(specifier) = import_source(node, bytes) {
                        outline.imports.push(specifier);
                    }
                }
                "export_statement" => {
                    if is_default_export(node) {
                        continue;
                    }
                    if let Some(decl) = node.child_by_field_name("declaration") {
                        declared_names(decl, bytes, &mut outline.exports);
                    }
                }
                _ => {}
            }
        }
        Some(outline)
    }
}

fn import_source(node: Node<'_>, bytes: &[u8]) -> Option<String> {
    // `import x = require("y")` carries no `source` field.
    let source = node.child_by_field_name("source")?;
    let text = source.utf8_text(bytes).ok()?;
    Some(text.trim_matches(|c| c == '"' || c == '\'').to_string())
}

fn is_default_export(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == "default");
    found
}

fn declared_names(decl: Node<'_>, bytes: &[u8], out: &mut Vec<String>) {
    match decl.kind() {
        "lexical_declaration" | "variable_declaration" => {
            let mut cursor = decl.walk();
            for declarator in decl.named_children(&mut cursor) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                // Destructuring patterns have no single name.
                if let Some(name) = declarator.child_by_field_name("name") {
                    push_identifier(name, bytes, out);
                }
            }
        }
        "ambient_declaration" => {
            let mut cursor = decl.walk();
            for inner in decl.named_children(&mut cursor) {
                declared_names(inner, bytes, out);
            }
        }
        _ => {
            if let Some(name) = decl.child_by_field_name("name") {
                push_identifier(name, bytes, out);
            }
        }
    }
}

fn push_identifier(node: Node<'_>, bytes: &[u8], out: &mut Vec<String>) {
    if !matches!(node.kind(), "identifier" | "type_identifier") {
        return;
    }
    if let Ok(text) = node.utf8_text(bytes) {
        out.push(text.to_string());
    }
}
