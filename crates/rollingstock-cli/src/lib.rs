//! # rollingstock-cli — The `rsk` Tool
//!
//! Command-line front end for the rolling stock workspace.
//!
//! ## Subcommands
//!
//! - `rsk validate --schema <id> <PATH>`: check a JSON or YAML document
//!   against a built-in schema.
//! - `rsk normalize <PATH>`: project a record, form, or catalog of forms
//!   into canonical railjson.
//! - `rsk schema <id>`: print a built-in schema as JSON Schema.
//!
//! Every handler returns the process exit code: 0 on success, 1 when the
//! input was rejected. Operational failures (unreadable file, bad config)
//! surface as `anyhow::Error` and also exit 1.
//!
//! ```bash
//! rsk validate --schema effort_curve_map curves.yaml
//! rsk -v normalize z2n.json
//! rsk schema rolling_resistance
//! ```

pub mod config;
pub mod normalize;
pub mod schema;
pub mod validate;

use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::{CliConfig, OutputFormat};

/// Write `value` as JSON in the configured layout, followed by a newline.
pub fn write_json<T: Serialize>(
    out: &mut dyn Write,
    config: &CliConfig,
    value: &T,
) -> Result<()> {
    let text = match config.output {
        OutputFormat::Pretty => serde_json::to_string_pretty(value),
        OutputFormat::Compact => serde_json::to_string(value),
    }
    .context("failed to serialize output")?;
    writeln!(out, "{text}").context("failed to write output")?;
    Ok(())
}
