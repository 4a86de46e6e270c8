//! # Normalize Subcommand
//!
//! Projects rolling stock documents into canonical railjson. The document
//! shape decides how it is read:
//!
//! - an object with `identifier` (or `id`) is a stored record;
//! - any other object is a form, registered in a fresh in-memory store to
//!   obtain its identifier;
//! - an array is a catalog of forms, all registered in one store, so names
//!   must be unique across the catalog.
//!
//! Nothing is printed on stdout unless every entry normalizes.
//!
//! The shape is read from a `serde_json::Value`; the typed entries are then
//! deserialized from the document text so curve maps keep their order.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rollingstock_core::{RollingStockForm, RollingStockRecord};
use rollingstock_railjson::{normalize_with, CanonicalRecord, NormalizeOptions, ValidationError};
use rollingstock_schema::{load_document, load_document_as};
use rollingstock_store::{InMemoryStore, RollingStockStore, StoreError};
use serde_json::Value;

use crate::config::CliConfig;
use crate::write_json;

/// Arguments for the `rsk normalize` subcommand.
#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Record, form, or catalog of forms (.json, .yaml or .yml).
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

/// Why one entry could not be projected.
#[derive(Debug, thiserror::Error)]
enum Rejection {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Execute the normalize subcommand.
///
/// Returns exit code: 0 if every entry was projected, 1 otherwise.
pub fn run_normalize(args: &NormalizeArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    let document = load_document(&args.path)
        .with_context(|| format!("failed to load {}", args.path.display()))?;
    let options = config.normalize_options();

    match document {
        Value::Array(_) => {
            let forms: Vec<RollingStockForm> = load_document_as(&args.path)
                .context("document is not a catalog of rolling stock forms")?;

            let store = InMemoryStore::new();
            let mut canonical = Vec::with_capacity(forms.len());
            let mut failures = Vec::new();
            for form in forms {
                let name = form.name.clone();
                match register_and_normalize(&store, form, &options) {
                    Ok(record) => canonical.push(record),
                    Err(e) => failures.push((name, e)),
                }
            }

            if failures.is_empty() {
                tracing::info!(records = canonical.len(), "normalized catalog");
                write_json(out, config, &canonical)?;
                return Ok(0);
            }
            for (name, err) in &failures {
                writeln!(out, "FAIL: {name:?}: {err}")?;
            }
            writeln!(
                out,
                "\n{} of {} rolling stock(s) rejected.",
                failures.len(),
                failures.len() + canonical.len()
            )?;
            Ok(1)
        }
        document => {
            let outcome = if has_identifier(&document) {
                let record: RollingStockRecord = load_document_as(&args.path)
                    .context("document is not a rolling stock record")?;
                normalize_with(&record, &options).map_err(Rejection::from)
            } else {
                let form: RollingStockForm = load_document_as(&args.path)
                    .context("document is not a rolling stock form")?;
                register_and_normalize(&InMemoryStore::new(), form, &options)
            };

            match outcome {
                Ok(record) => {
                    write_json(out, config, &record)?;
                    Ok(0)
                }
                Err(err) => {
                    writeln!(out, "FAIL: {}: {err}", args.path.display())?;
                    Ok(1)
                }
            }
        }
    }
}

fn register_and_normalize(
    store: &dyn RollingStockStore,
    form: RollingStockForm,
    options: &NormalizeOptions,
) -> Result<CanonicalRecord, Rejection> {
    let record = store.create(form)?;
    Ok(normalize_with(&record, options)?)
}

fn has_identifier(document: &Value) -> bool {
    document.get("identifier").is_some() || document.get("id").is_some()
}
