//! Binary and unary operator implementations.

use crate::{
    evaluator::EvalError,
    parser::{BinaryOp, UnaryOp},
};

/// Evaluate a binary operation on two numbers.
///
/// Division by zero and results that are not finite are errors rather than
/// IEEE infinities, so a worksheet never displays `inf` or `NaN`.
pub(super) fn eval_binary(op: BinaryOp, left: f64, right: f64) -> Result<f64, EvalError> {
    let value = match op {
        BinaryOp::Add => left + right,
        BinaryOp::Sub => left - right,
        BinaryOp::Mul => left * right,
        BinaryOp::Div => {
            if right == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            left / right
        }
        BinaryOp::Pow => left.powf(right),
    };
    finite(value)
}

pub(super) fn eval_unary(op: UnaryOp, value: f64) -> f64 {
    match op {
        UnaryOp::Neg => -value,
    }
}

pub(super) fn finite(value: f64) -> Result<f64, EvalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFinite)
    }
}
