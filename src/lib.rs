//! Slate - evaluate freeform math worksheets
//!
//! # Overview
//!
//! A worksheet is a canvas of math regions placed at (x, y) positions.
//! Slate parses each region's notation, classifies it as a definition, a
//! plain expression or a plot directive, and resolves it against the
//! definitions that come before it in reading order. Global definitions
//! (`g ≡ 20`) are visible everywhere.
//!
//! # Quick Start
//!
//! ```
//! use slate::{Region, Value, evaluate_worksheet};
//!
//! let regions = [
//!     Region::new("1", "a := 5", 0.0, 0.0),
//!     Region::new("2", "a + 2", 0.0, 50.0),
//!     Region::new("3", "g + 5", 0.0, 100.0),
//!     Region::new("4", "g ≡ 20", 0.0, 150.0),
//! ];
//!
//! let results = evaluate_worksheet(&regions);
//! assert_eq!(results.get("2"), Some(&Ok(Value::Numeric(7.0))));
//! assert_eq!(results.get("3"), Some(&Ok(Value::Numeric(25.0))));
//! ```
//!
//! # Requests
//!
//! Hosts that speak JSON go through [`parse_request`] and [`handle_request`]:
//!
//! ```
//! use slate::{Worksheet, handle_request, parse_request};
//!
//! let worksheet = Worksheet::default();
//! let request = parse_request(r#"{"regions": [{"id": "a", "content": "1 + 1", "x": 0, "y": 0}]}"#).unwrap();
//! let response = handle_request(&worksheet, request).unwrap();
//! assert_eq!(
//!     serde_json::to_string(&response).unwrap(),
//!     r#"{"results":{"a":"2"}}"#
//! );
//! ```

mod error_renderer;

pub use error_renderer::{
    render_parse_error, render_parse_error_to, render_parse_error_to_string,
    render_parse_error_to_string_no_color, render_region_error_to_string_no_color,
};

// Re-export public API from slate_core
pub use slate_core::api::{
    ErrorResponse, Payload, RegionOutput, RenderedResults, Request, RequestError, Response,
    WorksheetOptions, handle_request, parse_request,
};
pub use slate_core::worksheet::{
    Region, RegionError, RegionKind, Worksheet, WorksheetResults, evaluate_worksheet,
};

// Re-export the building blocks
pub use slate_core::evaluator::{self, EvalError, EvaluatorOptions};
pub use slate_core::parser::{self, Expr, ParseError, parse};
pub use slate_core::symbol_table::{self, SymbolTable};
pub use slate_core::values::{self, PlotPoint, Value};
