//! # Error Types
//!
//! Errors raised when a raw JSON value is turned into a typed domain value.
//! Schema violations are reported by `rollingstock-schema`; the errors here
//! only occur when a caller skips validation.

use thiserror::Error;

/// Failure to build a typed domain value from its raw JSON form.
#[derive(Error, Debug)]
pub enum ModelError {
    /// The value does not have the shape of the requested domain type.
    #[error("malformed {field}: {source}")]
    Malformed {
        /// Name of the record field being converted.
        field: &'static str,
        /// Underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },
}
