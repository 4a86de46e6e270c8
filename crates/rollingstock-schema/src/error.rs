//! # Schema Errors
//!
//! Errors about schemas and documents themselves, as opposed to
//! [`Violation`](crate::Violation)s, which describe a value that does not
//! satisfy a schema.

use thiserror::Error;

/// Error loading a schema or a document.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// No built-in schema has this identifier.
    #[error("unknown schema '{0}'")]
    UnknownSchema(String),

    /// A JSON Schema document uses a keyword this validator does not support.
    #[error("unsupported schema keyword '{keyword}' at '{path}'")]
    UnsupportedKeyword {
        /// JSON pointer to the schema node.
        path: String,
        /// The offending keyword.
        keyword: String,
    },

    /// A supported keyword has a value of the wrong shape.
    #[error("invalid schema keyword '{keyword}' at '{path}': {reason}")]
    InvalidKeyword {
        /// JSON pointer to the schema node.
        path: String,
        /// The offending keyword.
        keyword: String,
        /// What is wrong with it.
        reason: String,
    },

    /// The document file could not be read or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoad {
        /// Path to the document.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },
}
