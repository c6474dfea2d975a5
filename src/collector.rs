//! Function signature collection over a typed AST.

use std::ops::ControlFlow;

use crate::ast::{FunctionDeclaration, Node};
use crate::ast_walk::walk;
use crate::errors::MalformedNodeError;
use crate::types::FunctionSignature;

/// Collect one signature per function declaration under `root`.
///
/// Declarations are reported in pre-order discovery order, which is source
/// order for siblings. Nested declarations are included. Fails on the first
/// declaration that has no name.
pub fn collect(root: &Node) -> Result<Vec<FunctionSignature>, MalformedNodeError> {
    let mut results = Vec::new();
    let flow = walk(root, |node| match node {
        Node::FunctionDeclaration(decl) => match signature_of(decl) {
            Ok(sig) => {
                results.push(sig);
                ControlFlow::Continue(())
            }
            Err(e) => ControlFlow::Break(e),
        },
        _ => ControlFlow::Continue(()),
    });
    match flow {
        ControlFlow::Continue(()) => Ok(results),
        ControlFlow::Break(e) => Err(e),
    }
}

fn signature_of(decl: &FunctionDeclaration) -> Result<FunctionSignature, MalformedNodeError> {
    let id = decl
        .id
        .as_ref()
        .ok_or(MalformedNodeError::MissingIdentifier {
            line: decl.position.line,
            column: decl.position.column,
        })?;
    let parameters = decl.params.iter().map(|p| p.display_name()).collect();
    Ok(FunctionSignature::new(id.name.clone(), parameters))
}
