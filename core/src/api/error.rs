//! Errors for a whole request, as opposed to a single region.

use serde::Serialize;

use crate::worksheet::RegionError;

/// Request-level failure. Every variant maps to HTTP 400.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// `expression` was present but blank.
    #[error("No expression provided")]
    NoExpression,

    /// Neither `expression` nor `regions` was present.
    #[error("Request must contain \"expression\" or \"regions\"")]
    MissingField,

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// A single-shot expression failed to evaluate.
    #[error(transparent)]
    Expression(#[from] RegionError),
}

impl RequestError {
    /// HTTP status for this error.
    pub fn status(&self) -> u16 {
        400
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
        }
    }
}

/// Body sent with a failed request: `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
