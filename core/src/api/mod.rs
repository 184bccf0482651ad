//! Public API: request and response types for evaluating worksheets, and
//! the options that configure evaluation.
//!
//! # Example
//!
//! ```
//! use slate_core::api::{handle_request, parse_request};
//! use slate_core::worksheet::Worksheet;
//!
//! let worksheet = Worksheet::default();
//! let request = parse_request(r#"{"expression": "\\frac{1}{2}"}"#).unwrap();
//! let response = handle_request(&worksheet, request).unwrap();
//! assert_eq!(serde_json::to_string(&response).unwrap(), r#"{"result":"0.5"}"#);
//! ```

pub mod error;
pub mod options;
pub mod request;

pub use error::{ErrorResponse, RequestError};
pub use options::WorksheetOptions;
pub use request::{
    Payload, RegionOutput, RenderedResults, Request, Response, handle_request, parse_request,
};

#[cfg(test)]
mod request_test;
