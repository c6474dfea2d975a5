//! Shared types and data structures.

use std::fmt;

use serde::Serialize;

/// A function signature extracted from a function declaration.
///
/// `parameters` serialize under the key `args`, the shape consumed by the
/// test-generation tooling downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionSignature {
    name: String,
    #[serde(rename = "args")]
    parameters: Vec<String>,
}

impl FunctionSignature {
    pub fn new(name: impl Into<String>, parameters: Vec<String>) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }

    /// The declared function name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameter names in declaration order.
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }
}

impl fmt::Display for FunctionSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.parameters.join(", "))
    }
}

/// All signatures found in one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub file: String,
    pub functions: Vec<FunctionSignature>,
}
