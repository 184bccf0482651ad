//! Evaluation errors.
//!
//! Unresolved names are reported separately from the other failures because
//! worksheet regions render them differently ("Undefined Variable").

use crate::stdlib::Arity;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    /// Names with no binding, sorted and deduplicated.
    #[error("unresolved names: {}", names.join(", "))]
    Unresolved { names: Vec<String> },

    #[error("division by zero")]
    DivisionByZero,

    /// A function applied outside its real domain (`sqrt(-1)`, `ln(0)`).
    #[error("{function} is undefined for {argument}")]
    Domain { function: String, argument: f64 },

    #[error("{function} expects {expected}, got {found}")]
    Arity {
        function: String,
        expected: Arity,
        found: usize,
    },

    #[error("result is not a finite number")]
    NonFinite,

    /// The expression has no unresolved names yet does not reduce to a number.
    #[error("could not reduce '{expr}' to a number")]
    NotNumeric { expr: String },

    /// Evaluation recursion depth exceeded.
    #[error("evaluation stack overflow: depth {depth} exceeds maximum of {max_depth}")]
    StackOverflow { depth: usize, max_depth: usize },

    /// Substituting bindings grew the expression past the node limit.
    #[error("expression exceeds maximum size of {max_nodes} nodes")]
    ExpressionTooLarge { max_nodes: usize },
}
