mod format;
mod value;

pub use format::{DEFAULT_SIGNIFICANT_DIGITS, format_significant};
pub use value::{PlotPoint, Value};
