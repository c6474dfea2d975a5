//! Function signature inventory for JavaScript sources.
//!
//! Sources are parsed with tree-sitter, lowered into the typed AST in
//! [`ast`], and walked by [`collector::collect`], which reports one
//! [`types::FunctionSignature`] per function declaration.

pub mod ast;
pub mod ast_walk;
pub mod cli;
pub mod collector;
pub mod config;
pub mod errors;
pub mod logging;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod router;
pub mod source;
pub mod types;
pub mod walker;

pub use collector::collect;
pub use types::{FileReport, FunctionSignature};
