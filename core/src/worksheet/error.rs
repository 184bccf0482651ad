use crate::evaluator::EvalError;
use crate::parser::ParseError;
use crate::symbol_table::BindError;
use crate::worksheet::plot::PlotArgumentError;

/// The argument shape `plot` expects, as shown in arity errors.
pub const PLOT_SIGNATURE: &str = "4 arguments (function, variable, start, end)";

/// Why a single region failed. Never aborts the rest of the worksheet.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegionError {
    #[error("Invalid expression: {0}")]
    Parse(#[from] ParseError),

    #[error("plot expects {expected}, got {found}")]
    Arity { expected: &'static str, found: usize },

    /// Plot arguments whose brackets do not balance, so they cannot be counted.
    #[error("plot expects {expected}: {reason}")]
    MalformedArguments {
        expected: &'static str,
        reason: PlotArgumentError,
    },

    #[error("Undefined Variable: {}", .0.join(", "))]
    UndefinedVariable(Vec<String>),

    #[error("Evaluation failed: {0}")]
    Evaluation(String),
}

impl RegionError {
    /// Wire form: the message prefixed with `Error: `.
    pub fn render(&self) -> String {
        format!("Error: {}", self)
    }
}

impl From<EvalError> for RegionError {
    fn from(err: EvalError) -> Self {
        match err {
            EvalError::Unresolved { names } => RegionError::UndefinedVariable(names),
            other => RegionError::Evaluation(other.to_string()),
        }
    }
}

impl From<BindError> for RegionError {
    fn from(err: BindError) -> Self {
        RegionError::Evaluation(err.to_string())
    }
}

impl From<PlotArgumentError> for RegionError {
    fn from(reason: PlotArgumentError) -> Self {
        RegionError::MalformedArguments {
            expected: PLOT_SIGNATURE,
            reason,
        }
    }
}
