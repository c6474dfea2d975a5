//! JavaScript parsing with tree-sitter and lowering into the typed AST.
//!
//! tree-sitter recovers from syntax errors by inserting `ERROR` and
//! `MISSING` nodes. [`parse`] treats any such node as a [`SyntaxError`] so
//! callers only ever see trees for sources the grammar accepts.

use std::path::Path;

use tree_sitter::{Language, Node as TsNode, Parser, Tree};

use crate::ast::{FunctionDeclaration, Identifier, Node, Param, Position, VariableDeclarator};
use crate::errors::SyntaxError;

/// Deepest syntax tree [`parse`] will lower. Lowering recurses once per
/// level, so anything deeper is rejected before it can exhaust the stack.
pub const MAX_NESTING_DEPTH: usize = 256;

/// File extensions treated as JavaScript sources.
pub const SCRIPT_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "jsx"];

/// Whether `path` names a script file, by extension.
///
/// `additional` holds extra extensions (without the dot) from configuration.
pub fn is_script_path(path: &Path, additional: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    SCRIPT_EXTENSIONS.contains(&ext) || additional.iter().any(|a| a == ext)
}

fn grammar() -> Language {
    tree_sitter_javascript::LANGUAGE.into()
}

/// Create a new [`Parser`] configured for JavaScript.
pub fn get_parser() -> Parser {
    let mut parser = Parser::new();
    parser
        .set_language(&grammar())
        .expect("Error loading grammar: ABI version mismatch");
    parser
}

/// Parse `source` into a typed AST.
pub fn parse(source: &str) -> Result<Node, SyntaxError> {
    let mut parser = get_parser();
    let tree = parser.parse(source, None).ok_or_else(|| SyntaxError {
        message: "parser produced no tree".to_string(),
        line: 1,
        column: 0,
    })?;
    check_syntax(&tree, source.as_bytes())?;
    check_depth(&tree)?;
    Ok(lower(tree.root_node(), source.as_bytes()))
}

// ---------------------------------------------------------------------------
// Syntax errors
// ---------------------------------------------------------------------------

fn check_syntax(tree: &Tree, src: &[u8]) -> Result<(), SyntaxError> {
    let root = tree.root_node();
    if !root.has_error() {
        return Ok(());
    }
    let node = first_error(root).unwrap_or(root);
    let pos = position(node);
    let message = if node.is_missing() {
        format!("Missing `{}`", node.kind())
    } else {
        match first_token(node, src) {
            Some(tok) => format!("Unexpected token `{tok}`"),
            None => "Unexpected token".to_string(),
        }
    };
    Err(SyntaxError {
        message,
        line: pos.line,
        column: pos.column,
    })
}

/// The first `ERROR` or `MISSING` node in pre-order, descending only into
/// subtrees that contain one.
fn first_error(root: TsNode) -> Option<TsNode> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}

/// Reject trees nested deeper than [`MAX_NESTING_DEPTH`], reporting the
/// first node past the limit.
fn check_depth(tree: &Tree) -> Result<(), SyntaxError> {
    let mut cursor = tree.walk();
    let mut depth = 0usize;
    loop {
        if depth > MAX_NESTING_DEPTH {
            let pos = position(cursor.node());
            return Err(SyntaxError {
                message: format!("Nesting deeper than {MAX_NESTING_DEPTH} levels"),
                line: pos.line,
                column: pos.column,
            });
        }
        if cursor.goto_first_child() {
            depth += 1;
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return Ok(());
            }
            depth -= 1;
        }
    }
}

/// Text of the first leaf under `node`, if it has any text.
fn first_token<'a>(node: TsNode, src: &'a [u8]) -> Option<&'a str> {
    let mut leaf = node;
    while let Some(child) = leaf.child(0) {
        leaf = child;
    }
    let text = node_text(leaf, src).trim();
    (!text.is_empty()).then_some(text)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Get the text content of a node.
fn node_text<'a>(node: TsNode, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}

fn position(node: TsNode) -> Position {
    let p = node.start_position();
    Position {
        line: p.row + 1,
        column: p.column,
    }
}

fn field_ident(node: TsNode, field: &str, src: &[u8]) -> Option<Identifier> {
    node.child_by_field_name(field)
        .map(|n| Identifier::new(node_text(n, src)))
}

/// Whether `node` has an anonymous token child such as `async` or `default`.
fn has_token(node: TsNode, token: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .any(|c| !c.is_named() && c.kind() == token)
}

/// Named children, skipping comments.
fn named_children(node: TsNode) -> Vec<TsNode> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| !c.is_extra())
        .collect()
}

fn first_named(node: TsNode) -> Option<TsNode> {
    named_children(node).into_iter().next()
}

fn lower_children(node: TsNode, src: &[u8]) -> Vec<Node> {
    named_children(node)
        .into_iter()
        .map(|c| lower(c, src))
        .collect()
}

fn lower_field(node: TsNode, field: &str, src: &[u8]) -> Option<Box<Node>> {
    node.child_by_field_name(field)
        .map(|n| Box::new(lower(n, src)))
}

/// Lower a field the grammar always provides once the tree is error-free.
fn required_field(node: TsNode, field: &str, src: &[u8]) -> Box<Node> {
    lower_field(node, field, src).unwrap_or_else(|| Box::new(Node::empty_block()))
}

// ---------------------------------------------------------------------------
// Lowering
// ---------------------------------------------------------------------------

fn lower(node: TsNode, src: &[u8]) -> Node {
    match node.kind() {
        "program" => Node::Program {
            body: lower_children(node, src),
        },
        "function_declaration" | "generator_function_declaration" => {
            Node::FunctionDeclaration(lower_declaration(node, src))
        }
        "function_expression" | "function" | "generator_function" => Node::FunctionExpression {
            id: field_ident(node, "name", src),
            params: lower_params(node, src),
            body: required_field(node, "body", src),
        },
        "arrow_function" => {
            let params = match node.child_by_field_name("parameter") {
                Some(p) => vec![lower_param(p, src)],
                None => lower_params(node, src),
            };
            Node::ArrowFunction {
                params,
                body: required_field(node, "body", src),
            }
        }
        "class_declaration" | "class" => Node::Class {
            id: field_ident(node, "name", src),
            superclass: named_children(node)
                .into_iter()
                .find(|c| c.kind() == "class_heritage")
                .and_then(first_named)
                .map(|c| Box::new(lower(c, src))),
            body: node
                .child_by_field_name("body")
                .map(|b| lower_children(b, src))
                .unwrap_or_default(),
        },
        "method_definition" => Node::MethodDefinition {
            key: node
                .child_by_field_name("name")
                .map(|n| node_text(n, src).to_string())
                .unwrap_or_default(),
            params: lower_params(node, src),
            body: required_field(node, "body", src),
        },
        "statement_block" => Node::BlockStatement {
            body: lower_children(node, src),
        },
        "if_statement" => Node::IfStatement {
            test: required_field(node, "condition", src),
            consequent: required_field(node, "consequence", src),
            alternate: node
                .child_by_field_name("alternative")
                .and_then(first_named)
                .map(|c| Box::new(lower(c, src))),
        },
        "lexical_declaration" | "variable_declaration" => lower_variables(node, src),
        "return_statement" => Node::ReturnStatement {
            argument: first_named(node).map(|c| Box::new(lower(c, src))),
        },
        "expression_statement" => match first_named(node) {
            Some(expr) => Node::ExpressionStatement {
                expression: Box::new(lower(expr, src)),
            },
            None => Node::Other {
                kind: node.kind().to_string(),
                children: Vec::new(),
            },
        },
        "export_statement" => lower_export(node, src),
        "identifier" => Node::ident(node_text(node, src)),
        "string" | "number" | "regex" | "true" | "false" | "null" | "undefined" => Node::Literal {
            raw: node_text(node, src).to_string(),
        },
        kind => Node::Other {
            kind: kind.to_string(),
            children: lower_children(node, src),
        },
    }
}

fn lower_declaration(node: TsNode, src: &[u8]) -> FunctionDeclaration {
    FunctionDeclaration {
        id: field_ident(node, "name", src),
        params: lower_params(node, src),
        body: required_field(node, "body", src),
        position: position(node),
    }
}

fn lower_params(node: TsNode, src: &[u8]) -> Vec<Param> {
    node.child_by_field_name("parameters")
        .map(|list| {
            named_children(list)
                .into_iter()
                .map(|p| lower_param(p, src))
                .collect()
        })
        .unwrap_or_default()
}

fn lower_param(node: TsNode, src: &[u8]) -> Param {
    match node.kind() {
        "identifier" => Param::Identifier(Identifier::new(node_text(node, src))),
        "assignment_pattern" => match node.child_by_field_name("left") {
            Some(left) => Param::Default {
                target: Box::new(lower_param(left, src)),
                value: required_field(node, "right", src),
            },
            None => pattern(node, src),
        },
        "rest_pattern" => match first_named(node) {
            Some(inner) => Param::Rest(Box::new(lower_param(inner, src))),
            None => pattern(node, src),
        },
        _ => pattern(node, src),
    }
}

fn pattern(node: TsNode, src: &[u8]) -> Param {
    Param::Pattern {
        text: node_text(node, src).to_string(),
        children: lower_children(node, src),
    }
}

fn lower_variables(node: TsNode, src: &[u8]) -> Node {
    let kind = node
        .child(0)
        .map(|c| node_text(c, src).to_string())
        .unwrap_or_default();
    let declarations = named_children(node)
        .into_iter()
        .filter(|c| c.kind() == "variable_declarator")
        .filter_map(|d| {
            let target = d.child_by_field_name("name")?;
            Some(VariableDeclarator {
                target: lower_param(target, src),
                init: lower_field(d, "value", src),
            })
        })
        .collect();
    Node::VariableDeclaration { kind, declarations }
}

/// `export default function () {}` becomes a declaration without a name,
/// the same shape ESTree gives it.
fn lower_export(node: TsNode, src: &[u8]) -> Node {
    let is_default = has_token(node, "default");
    let declaration = if let Some(decl) = node.child_by_field_name("declaration") {
        Some(lower(decl, src))
    } else if let Some(value) = node.child_by_field_name("value") {
        let anonymous_function = matches!(
            value.kind(),
            "function_expression" | "function" | "generator_function"
        );
        if is_default && anonymous_function {
            Some(Node::FunctionDeclaration(lower_declaration(value, src)))
        } else {
            Some(lower(value, src))
        }
    } else {
        None
    };
    Node::ExportDeclaration {
        is_default,
        declaration: declaration.map(Box::new),
    }
}
