//! # rollingstock-schema — Declarative Schema Validation
//!
//! Validates JSON value trees against a typed, recursive [`Schema`] and
//! reports every violation with a JSON-pointer path and a reason code.
//!
//! ## Modules
//!
//! - [`schema`]: the `Schema` tree and its conversion to and from JSON
//!   Schema documents (the supported subset only).
//! - [`validate`]: the generic validator: [`validate`], [`validate_with`],
//!   [`Violation`], [`ValidationResult`].
//! - [`catalog`]: the built-in rolling stock schemas, addressed by
//!   [`SchemaId`], and [`validate_schema`].
//! - [`document`]: loading JSON/YAML documents from disk, as JSON values or
//!   straight into a typed value.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `rollingstock-*` crates.
//! - Validation is pure: neither the schema nor the value is mutated, and the
//!   same pair always yields the same result.
//! - Built-in schemas are initialized once and shared read-only.

pub mod catalog;
pub mod document;
pub mod error;
pub mod schema;
pub mod validate;

pub use catalog::{
    validate_schema, validate_schema_with, SchemaId, CAPABILITY_MAX_LENGTH, NAME_MAX_LENGTH,
    TRACTION_MODE_MAX_LENGTH,
};
pub use document::{load_document, load_document_as};
pub use error::SchemaError;
pub use schema::{AdditionalProperties, ObjectSchema, Schema, StringFormat};
pub use validate::{
    escape_token, validate, validate_with, ValidationOptions, ValidationResult, Violation,
    ViolationReason,
};
