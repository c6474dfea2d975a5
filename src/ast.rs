//! Typed abstract syntax tree for JavaScript sources.
//!
//! The parser lowers tree-sitter's concrete syntax tree into these types.
//! Constructs the extractor cares about get their own variant with typed
//! fields; everything else is kept as [`Node::Other`] so that nested
//! declarations stay reachable.
//!
//! Children are owned through `Box`/`Vec`, so every value of [`Node`] is a
//! finite tree.

/// A source position: 1-based line, 0-based column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

/// A bound name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A formal parameter of a function, arrow function or method.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// `x`
    Identifier(Identifier),
    /// `x = value`
    Default { target: Box<Param>, value: Box<Node> },
    /// `...x`
    Rest(Box<Param>),
    /// `{ a, b }` or `[a, b]`, kept as source text.
    Pattern { text: String, children: Vec<Node> },
}

impl Param {
    /// The name used in a signature record.
    ///
    /// Defaults report their target, rest parameters keep the `...`
    /// prefix and destructuring patterns report their source text.
    pub fn display_name(&self) -> String {
        match self {
            Param::Identifier(id) => id.name.clone(),
            Param::Default { target, .. } => target.display_name(),
            Param::Rest(target) => format!("...{}", target.display_name()),
            Param::Pattern { text, .. } => text.clone(),
        }
    }
}

/// A `function name(params) { body }` statement.
///
/// `id` is `None` only for `export default function () {}`, which is
/// modelled as a declaration without a name.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub id: Option<Identifier>,
    pub params: Vec<Param>,
    pub body: Box<Node>,
    pub position: Position,
}

/// A single `name = init` binding inside a variable declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclarator {
    pub target: Param,
    pub init: Option<Box<Node>>,
}

/// One syntactic construct.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Program {
        body: Vec<Node>,
    },
    FunctionDeclaration(FunctionDeclaration),
    FunctionExpression {
        id: Option<Identifier>,
        params: Vec<Param>,
        body: Box<Node>,
    },
    ArrowFunction {
        params: Vec<Param>,
        body: Box<Node>,
    },
    Class {
        id: Option<Identifier>,
        superclass: Option<Box<Node>>,
        body: Vec<Node>,
    },
    MethodDefinition {
        key: String,
        params: Vec<Param>,
        body: Box<Node>,
    },
    BlockStatement {
        body: Vec<Node>,
    },
    IfStatement {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Option<Box<Node>>,
    },
    VariableDeclaration {
        /// `var`, `let` or `const`.
        kind: String,
        declarations: Vec<VariableDeclarator>,
    },
    ReturnStatement {
        argument: Option<Box<Node>>,
    },
    ExpressionStatement {
        expression: Box<Node>,
    },
    ExportDeclaration {
        is_default: bool,
        declaration: Option<Box<Node>>,
    },
    Identifier(Identifier),
    Literal {
        raw: String,
    },
    /// Any construct without a dedicated variant, with its named children.
    Other {
        kind: String,
        children: Vec<Node>,
    },
}

impl Node {
    /// A short name for the node's syntactic kind, in ESTree spelling
    /// where one exists.
    pub fn kind(&self) -> &str {
        match self {
            Node::Program { .. } => "Program",
            Node::FunctionDeclaration(_) => "FunctionDeclaration",
            Node::FunctionExpression { .. } => "FunctionExpression",
            Node::ArrowFunction { .. } => "ArrowFunctionExpression",
            Node::Class { .. } => "Class",
            Node::MethodDefinition { .. } => "MethodDefinition",
            Node::BlockStatement { .. } => "BlockStatement",
            Node::IfStatement { .. } => "IfStatement",
            Node::VariableDeclaration { .. } => "VariableDeclaration",
            Node::ReturnStatement { .. } => "ReturnStatement",
            Node::ExpressionStatement { .. } => "ExpressionStatement",
            Node::ExportDeclaration { .. } => "ExportDeclaration",
            Node::Identifier(_) => "Identifier",
            Node::Literal { .. } => "Literal",
            Node::Other { kind, .. } => kind,
        }
    }

    /// Build an identifier node.
    pub fn ident(name: impl Into<String>) -> Node {
        Node::Identifier(Identifier::new(name))
    }

    /// Build an empty block.
    pub fn empty_block() -> Node {
        Node::BlockStatement { body: Vec::new() }
    }
}
