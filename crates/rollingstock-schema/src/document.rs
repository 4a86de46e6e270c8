//! # Document Loading
//!
//! Reads a rolling stock document from disk. The format is chosen from the
//! file extension: `.yaml`/`.yml` are parsed as YAML, anything else as JSON.
//! Both formats deserialize straight into the target type; there is no
//! intermediate YAML tree.
//!
//! `serde_json::Value` objects are sorted by key. Callers that depend on
//! document key order use [`load_document_as`] with a type whose
//! deserializer observes it.
//!
//! A YAML `.nan` or `.inf` has no JSON number form and loads as `null`
//! into a `Value`; schema checks then report it as `wrong_type`.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::SchemaError;

/// Load a JSON or YAML document as a JSON tree.
///
/// # Errors
///
/// Returns `SchemaError::DocumentLoad` if the file cannot be read or does
/// not parse.
pub fn load_document(path: &Path) -> Result<Value, SchemaError> {
    load_document_as(path)
}

/// Load a JSON or YAML document directly into `T`, keeping mapping order
/// for types whose deserializer observes it.
///
/// # Errors
///
/// Returns `SchemaError::DocumentLoad` if the file cannot be read or does
/// not deserialize into `T`.
pub fn load_document_as<T: DeserializeOwned>(path: &Path) -> Result<T, SchemaError> {
    let content = read(path)?;
    if is_yaml(path) {
        serde_yaml::from_str(&content)
            .map_err(|e| document_error(path, format!("invalid YAML: {e}")))
    } else {
        serde_json::from_str(&content)
            .map_err(|e| document_error(path, format!("invalid JSON: {e}")))
    }
}

fn read(path: &Path) -> Result<String, SchemaError> {
    std::fs::read_to_string(path)
        .map_err(|e| document_error(path, format!("cannot read file: {e}")))
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml" | "yml")
    )
}

fn document_error(path: &Path, reason: String) -> SchemaError {
    SchemaError::DocumentLoad {
        path: path.display().to_string(),
        reason,
    }
}
