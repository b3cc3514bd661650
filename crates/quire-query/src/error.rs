//! Error types for query input handling.
//!
//! Compilation itself cannot fail: every literal is quoted and percent-encoding
//! is total. Errors only arise while turning outside input into typed values.

use thiserror::Error;

/// Errors raised while reading query inputs.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A query mode name was not one of `simple`, `advanced` or `raw`.
    #[error("unknown query mode '{0}'")]
    UnknownMode(String),

    /// A filter map could not be read from JSON.
    #[error("invalid filter map: {0}")]
    InvalidFilters(#[from] serde_json::Error),
}

impl QueryError {
    /// Returns a suggestion for common errors.
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::UnknownMode(_) => Some("Valid modes are: simple, advanced, raw"),
            Self::InvalidFilters(_) => Some(
                "Expected an object of field name to entry list, e.g. \
                 {\"title\": [{\"value\": \"treaty\", \"operator\": \"AND\"}]}",
            ),
        }
    }
}
