//! Configuration options for worksheet evaluation.

use crate::evaluator::EvaluatorOptions;
use crate::parser::DEFAULT_MAX_DEPTH;
use crate::values::DEFAULT_SIGNIFICANT_DIGITS;

/// Configuration options for a [`Worksheet`](crate::worksheet::Worksheet).
///
/// # Example
///
/// ```
/// use slate_core::api::WorksheetOptions;
///
/// let options = WorksheetOptions {
///     plot_samples: 200,
///     ..WorksheetOptions::default()
/// };
/// assert_eq!(options.significant_digits, 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WorksheetOptions {
    /// Number of points sampled per plot, both range ends included.
    ///
    /// Default: 100
    pub plot_samples: usize,

    /// Significant digits in rendered numbers. Bound values keep full
    /// precision.
    ///
    /// Default: 4
    pub significant_digits: usize,

    /// Limits applied while evaluating each region.
    pub evaluator: EvaluatorOptions,

    /// Maximum bracket nesting accepted by the parser.
    ///
    /// Default: 256
    pub parser_max_depth: usize,
}

impl Default for WorksheetOptions {
    fn default() -> Self {
        Self {
            plot_samples: 100,
            significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
            evaluator: EvaluatorOptions::default(),
            parser_max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
