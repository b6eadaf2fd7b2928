use crate::error::{Result, RewriteError};
use crate::language::Language;
use crate::types::DeclarationHandle;
use tree_sitter::{Node, Parser, Tree};

/// Structural declaration locator backed by tree-sitter.
///
/// Finds an exported arrow-function binding by name and resolves its return
/// expression into byte spans, independent of parameter destructuring shape,
/// spacing, or parenthesization. Locating never mutates the document.
pub struct AstLocator {
    parser: Parser,
    language: Language,
}

impl AstLocator {
    /// Create a locator for a language
    pub fn new(language: Language) -> Result<Self> {
        if !language.supports_ast() {
            return Err(RewriteError::unsupported_language(language.as_str()));
        }
        let ts_language = language.tree_sitter_language()?;
        let mut parser = Parser::new();
        parser
            .set_language(&ts_language)
            .map_err(|e| RewriteError::parse(format!("failed to set language: {e}")))?;
        Ok(Self { parser, language })
    }

    /// Whether the content parses with syntax errors under this grammar
    pub fn has_syntax_errors(&mut self, content: &str) -> Result<bool> {
        let tree = self.parse(content)?;
        Ok(tree.root_node().has_error())
    }

    /// Locate a declaration by its exact binding name and resolve a handle to
    /// its returned JSX element.
    pub fn locate(&mut self, content: &str, name: &str) -> Result<DeclarationHandle> {
        let tree = self.parse(content)?;
        let root = tree.root_node();
        if root.has_error() {
            return Err(RewriteError::parse(format!(
                "source contains syntax errors under the {} grammar",
                self.language.as_str()
            )));
        }

        let declarator =
            find_declarator(root, content, name).ok_or_else(|| RewriteError::not_found(name))?;

        let value = declarator
            .child_by_field_name("value")
            .ok_or_else(|| RewriteError::unexpected_shape(name, "declaration has no initializer"))?;
        if value.kind() != "arrow_function" {
            return Err(RewriteError::unexpected_shape(
                name,
                format!("initializer is {}, expected an arrow function", value.kind()),
            ));
        }

        let body = value
            .child_by_field_name("body")
            .ok_or_else(|| RewriteError::unexpected_shape(name, "arrow function has no body"))?;
        let expr = if body.kind() == "statement_block" {
            let ret = find_first(body, "return_statement")
                .ok_or_else(|| RewriteError::return_missing(name))?;
            ret.named_child(0)
                .ok_or_else(|| RewriteError::return_missing(name))?
        } else {
            body
        };
        let expr = unwrap_parenthesized(expr);

        match expr.kind() {
            "jsx_element" => {
                let open = expr
                    .child(0)
                    .filter(|n| n.kind() == "jsx_opening_element")
                    .ok_or_else(|| {
                        RewriteError::unexpected_shape(name, "JSX element has no opening tag")
                    })?;
                let close = expr
                    .child(expr.child_count().saturating_sub(1))
                    .filter(|n| n.kind() == "jsx_closing_element")
                    .ok_or_else(|| {
                        RewriteError::unexpected_shape(name, "JSX element has no closing tag")
                    })?;
                Ok(DeclarationHandle {
                    name: name.to_string(),
                    tag: element_name(open, content),
                    return_span: expr.byte_range(),
                    inner_span: Some(open.end_byte()..close.start_byte()),
                })
            }
            "jsx_self_closing_element" => Ok(DeclarationHandle {
                name: name.to_string(),
                tag: element_name(expr, content),
                return_span: expr.byte_range(),
                inner_span: None,
            }),
            other => Err(RewriteError::unexpected_shape(
                name,
                format!("return expression is {other}, expected a JSX element"),
            )),
        }
    }

    fn parse(&mut self, content: &str) -> Result<Tree> {
        self.parser
            .parse(content, None)
            .ok_or_else(|| RewriteError::parse("failed to parse source"))
    }
}

/// Find the `variable_declarator` with the given binding name among the
/// top-level (optionally exported) declarations.
fn find_declarator<'a>(root: Node<'a>, content: &str, name: &str) -> Option<Node<'a>> {
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        let decl = match child.kind() {
            "export_statement" => child.child_by_field_name("declaration"),
            "lexical_declaration" | "variable_declaration" => Some(child),
            _ => None,
        };
        let Some(decl) = decl else { continue };
        if !matches!(decl.kind(), "lexical_declaration" | "variable_declaration") {
            continue;
        }
        let mut decl_cursor = decl.walk();
        for declarator in decl.named_children(&mut decl_cursor) {
            if declarator.kind() != "variable_declarator" {
                continue;
            }
            if let Some(name_node) = declarator.child_by_field_name("name") {
                if &content[name_node.byte_range()] == name {
                    return Some(declarator);
                }
            }
        }
    }
    None
}

/// Depth-first search for the first node of a kind
fn find_first<'a>(node: Node<'a>, kind: &str) -> Option<Node<'a>> {
    if node.kind() == kind {
        return Some(node);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = find_first(child, kind) {
            return Some(found);
        }
    }
    None
}

/// Strip any number of wrapping parentheses around an expression
fn unwrap_parenthesized(mut node: Node) -> Node {
    while node.kind() == "parenthesized_expression" {
        match node.named_child(0) {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

/// Tag name of a JSX opening or self-closing element
fn element_name(element: Node, content: &str) -> String {
    element
        .child_by_field_name("name")
        .map(|n| content[n.byte_range()].to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
