//! Pre-order traversal over the typed AST.
//!
//! [`walk`] visits a node and then every node reachable through its fields,
//! each exactly once. Field order is fixed per variant (see [`children`]), so
//! the visit order is deterministic and matches source order for siblings.
//!
//! The traversal keeps its own stack instead of recursing, so deeply nested
//! sources cannot exhaust the call stack.

use std::ops::ControlFlow;

use crate::ast::{Node, Param, VariableDeclarator};

/// Walk `root` in pre-order, calling `visit` once per node.
///
/// `visit` runs before the node's children are visited. Returning
/// [`ControlFlow::Break`] stops the walk immediately and the break value is
/// handed back to the caller.
pub fn walk<'a, B, F>(root: &'a Node, mut visit: F) -> ControlFlow<B>
where
    F: FnMut(&'a Node) -> ControlFlow<B>,
{
    let mut stack: Vec<&'a Node> = vec![root];
    while let Some(node) = stack.pop() {
        visit(node)?;
        // Reverse so the first child is popped next.
        stack.extend(children(node).into_iter().rev());
    }
    ControlFlow::Continue(())
}

/// Walk `root` in pre-order without early exit.
pub fn for_each_node<'a, F>(root: &'a Node, mut f: F)
where
    F: FnMut(&'a Node),
{
    let _ = walk(root, |node| -> ControlFlow<()> {
        f(node);
        ControlFlow::Continue(())
    });
}

/// The direct children of `node`, in field order.
///
/// Absent optional fields and primitive fields contribute nothing; sequence
/// fields contribute their elements in order.
pub fn children(node: &Node) -> Vec<&Node> {
    let mut out = Vec::new();
    match node {
        Node::Program { body } | Node::BlockStatement { body } => out.extend(body),
        Node::FunctionDeclaration(decl) => {
            push_params(&decl.params, &mut out);
            out.push(&*decl.body);
        }
        Node::FunctionExpression { params, body, .. }
        | Node::ArrowFunction { params, body }
        | Node::MethodDefinition { params, body, .. } => {
            push_params(params, &mut out);
            out.push(&**body);
        }
        Node::Class {
            superclass, body, ..
        } => {
            out.extend(superclass.as_deref());
            out.extend(body);
        }
        Node::IfStatement {
            test,
            consequent,
            alternate,
        } => {
            out.push(&**test);
            out.push(&**consequent);
            out.extend(alternate.as_deref());
        }
        Node::VariableDeclaration { declarations, .. } => {
            for VariableDeclarator { target, init } in declarations {
                push_param(target, &mut out);
                out.extend(init.as_deref());
            }
        }
        Node::ReturnStatement { argument } => out.extend(argument.as_deref()),
        Node::ExpressionStatement { expression } => out.push(&**expression),
        Node::ExportDeclaration { declaration, .. } => out.extend(declaration.as_deref()),
        Node::Identifier(_) | Node::Literal { .. } => {}
        Node::Other { children, .. } => out.extend(children),
    }
    out
}

fn push_params<'a>(params: &'a [Param], out: &mut Vec<&'a Node>) {
    for param in params {
        push_param(param, out);
    }
}

/// Nodes embedded in a parameter: default values and destructuring
/// sub-patterns. Plain identifiers carry none.
fn push_param<'a>(param: &'a Param, out: &mut Vec<&'a Node>) {
    match param {
        Param::Identifier(_) => {}
        Param::Default { target, value } => {
            push_param(target, out);
            out.push(&**value);
        }
        Param::Rest(target) => push_param(target, out),
        Param::Pattern { children, .. } => out.extend(children),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{FunctionDeclaration, Identifier, Position};

    fn func(name: &str, body: Vec<Node>) -> Node {
        Node::FunctionDeclaration(FunctionDeclaration {
            id: Some(Identifier::new(name)),
            params: Vec::new(),
            body: Box::new(Node::BlockStatement { body }),
            position: Position::default(),
        })
    }

    fn kinds(root: &Node) -> Vec<String> {
        let mut seen = Vec::new();
        for_each_node(root, |n| seen.push(n.kind().to_string()));
        seen
    }

    #[test]
    fn visits_root_first() {
        let root = Node::Program { body: vec![] };
        assert_eq!(kinds(&root), vec!["Program"]);
    }

    #[test]
    fn pre_order_across_siblings_and_depth() {
        // if (x) { function inner() {} } else y;
        let root = Node::Program {
            body: vec![
                Node::IfStatement {
                    test: Box::new(Node::ident("x")),
                    consequent: Box::new(Node::BlockStatement {
                        body: vec![func("inner", vec![])],
                    }),
                    alternate: Some(Box::new(Node::ExpressionStatement {
                        expression: Box::new(Node::ident("y")),
                    })),
                },
                Node::Literal { raw: "1".into() },
            ],
        };
        assert_eq!(
            kinds(&root),
            vec![
                "Program",
                "IfStatement",
                "Identifier",
                "BlockStatement",
                "FunctionDeclaration",
                "BlockStatement",
                "ExpressionStatement",
                "Identifier",
                "Literal",
            ]
        );
    }

    #[test]
    fn each_node_visited_once() {
        let root = Node::Program {
            body: vec![func("a", vec![func("b", vec![])]), func("c", vec![])],
        };
        let mut count = 0;
        for_each_node(&root, |_| count += 1);
        // Program + 3 declarations + 3 bodies
        assert_eq!(count, 7);
    }

    #[test]
    fn absent_optional_fields_are_skipped() {
        let root = Node::ReturnStatement { argument: None };
        assert_eq!(children(&root).len(), 0);
        assert_eq!(kinds(&root), vec!["ReturnStatement"]);
    }

    #[test]
    fn descends_into_parameter_defaults() {
        let decl = Node::FunctionDeclaration(FunctionDeclaration {
            id: Some(Identifier::new("outer")),
            params: vec![Param::Default {
                target: Box::new(Param::Identifier(Identifier::new("cb"))),
                value: Box::new(Node::FunctionExpression {
                    id: None,
                    params: vec![],
                    body: Box::new(Node::BlockStatement {
                        body: vec![func("hidden", vec![])],
                    }),
                }),
            }],
            body: Box::new(Node::empty_block()),
            position: Position::default(),
        });
        let seen = kinds(&decl);
        assert_eq!(
            seen.iter().filter(|k| *k == "FunctionDeclaration").count(),
            2
        );
    }

    #[test]
    fn other_nodes_keep_children_reachable() {
        let root = Node::Other {
            kind: "for_statement".into(),
            children: vec![Node::BlockStatement {
                body: vec![func("inLoop", vec![])],
            }],
        };
        assert!(kinds(&root).contains(&"FunctionDeclaration".to_string()));
    }

    #[test]
    fn break_stops_the_walk() {
        let root = Node::Program {
            body: vec![func("a", vec![]), func("b", vec![])],
        };
        let mut visited = 0;
        let flow = walk(&root, |node| {
            visited += 1;
            match node {
                Node::FunctionDeclaration(d) => ControlFlow::Break(d.id.clone()),
                _ => ControlFlow::Continue(()),
            }
        });
        assert_eq!(flow, ControlFlow::Break(Some(Identifier::new("a"))));
        assert_eq!(visited, 2);
    }

    #[test]
    fn deep_nesting_does_not_overflow() {
        let mut node = Node::empty_block();
        for _ in 0..100_000 {
            node = Node::BlockStatement { body: vec![node] };
        }
        let mut count = 0usize;
        for_each_node(&node, |_| count += 1);
        assert_eq!(count, 100_001);
        // Dropping a tree this deep recurses in the compiler-generated drop
        // glue; leak it so the test only exercises the walker.
        std::mem::forget(node);
    }
}
