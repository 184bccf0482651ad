//! Tree-walking evaluator for parsed math expressions.
//!
//! Evaluation is substitute, then simplify:
//!
//! 1. Every name bound in the [`SymbolTable`] is replaced by its value.
//! 2. The tree is folded bottom-up. Numeric sub-trees become numbers, and a
//!    handful of identities (`x + 0`, `x * 1`, `x - x`, ...) are applied.
//!
//! In [`Mode::Numeric`] the result must be a number; remaining names are
//! reported as [`EvalError::Unresolved`]. In [`Mode::Symbolic`] whatever is
//! left is returned as a `Value::Symbolic`.
//!
//! ## Example
//!
//! ```
//! use slate_core::evaluator::{Mode, evaluate};
//! use slate_core::parser::parse;
//! use slate_core::symbol_table::SymbolTable;
//! use slate_core::values::Value;
//!
//! let table = SymbolTable::with_constants();
//! let expr = parse(r"\frac{1}{2}").unwrap();
//! assert_eq!(evaluate(&expr, &table, Mode::Numeric), Ok(Value::Numeric(0.5)));
//! ```

mod error;
mod eval;
mod operators;

#[cfg(test)]
mod eval_test;

pub use error::EvalError;
pub use eval::{Evaluator, EvaluatorOptions, Mode, free_symbols};

use crate::parser::Expr;
use crate::symbol_table::SymbolTable;
use crate::values::Value;

/// Evaluate an expression against `table` with default limits.
pub fn evaluate(expr: &Expr, table: &SymbolTable, mode: Mode) -> Result<Value, EvalError> {
    evaluate_with_options(expr, table, mode, EvaluatorOptions::default())
}

/// Evaluate an expression against `table` with custom limits.
pub fn evaluate_with_options(
    expr: &Expr,
    table: &SymbolTable,
    mode: Mode,
    options: EvaluatorOptions,
) -> Result<Value, EvalError> {
    Evaluator::new(options, table).evaluate(expr, mode)
}
