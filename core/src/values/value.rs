use core::fmt;

use serde::Serialize;

use crate::parser::Expr;
use crate::values::{DEFAULT_SIGNIFICANT_DIGITS, format_significant};

/// Result of evaluating one region.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Numeric(f64),
    /// An expression that still contains unresolved names, or that the caller
    /// asked to keep symbolic.
    Symbolic(Expr),
    PlotSeries(Vec<PlotPoint>),
}

/// One sample of a plotted function. `y` is `None` where the function is
/// undefined or not finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PlotPoint {
    pub x: f64,
    pub y: Option<f64>,
}

impl Value {
    /// Wrap a reduced expression, collapsing plain numbers to `Numeric`.
    pub fn from_expr(expr: Expr) -> Self {
        match expr {
            Expr::Number(n) => Value::Numeric(n),
            other => Value::Symbolic(other),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Numeric(n) => Some(*n),
            _ => None,
        }
    }

    /// Only values that can be substituted back into an expression may live
    /// in a symbol table.
    pub fn is_bindable(&self) -> bool {
        !matches!(self, Value::PlotSeries(_))
    }

    /// The expression this value stands for when substituted, if any.
    pub fn to_expr(&self) -> Option<Expr> {
        match self {
            Value::Numeric(n) => Some(Expr::Number(*n)),
            Value::Symbolic(expr) => Some(expr.clone()),
            Value::PlotSeries(_) => None,
        }
    }

    /// Display string with numbers rounded to `digits` significant digits.
    pub fn render(&self, digits: usize) -> String {
        match self {
            Value::Numeric(n) => format_significant(*n, digits),
            Value::Symbolic(expr) => expr.display_with(digits).to_string(),
            Value::PlotSeries(points) => format!("plot({} points)", points.len()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_SIGNIFICANT_DIGITS))
    }
}
