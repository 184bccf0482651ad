//! Worksheet evaluation: classify regions, order them, and resolve each
//! against a shared symbol table.
//!
//! ```
//! use slate_core::values::Value;
//! use slate_core::worksheet::{Region, evaluate_worksheet};
//!
//! let regions = [
//!     Region::new("use", "a + 2", 0.0, 100.0),
//!     Region::new("def", "a := 5", 0.0, 0.0),
//! ];
//! let results = evaluate_worksheet(&regions);
//! assert_eq!(results.get("use"), Some(&Ok(Value::Numeric(7.0))));
//! ```

mod adapter;
mod classifier;
mod error;
pub mod plot;
mod region;
mod scheduler;

pub use adapter::EvaluationAdapter;
pub use classifier::{classify, classify_with_max_depth};
pub use error::{PLOT_SIGNATURE, RegionError};
pub use plot::{PlotArgumentError, split_arguments};
pub use region::{ClassifiedRegion, Region, RegionBody, RegionKind};
pub use scheduler::{Worksheet, WorksheetResults, evaluate_worksheet};
