//! # Validate Subcommand
//!
//! Checks one JSON or YAML document against a built-in schema and reports
//! every violation found, one per line or as a JSON array with `--json`.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rollingstock_schema::{load_document, validate_schema_with, SchemaId, ValidationResult};

use crate::config::CliConfig;
use crate::write_json;

/// Arguments for the `rsk validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Built-in schema to validate against (rolling_resistance, effort_curve,
    /// effort_curve_map, rolling_stock).
    #[arg(long, short = 's')]
    pub schema: SchemaId,

    /// Print violations as a JSON array.
    #[arg(long)]
    pub json: bool,

    /// Document to validate (.json, .yaml or .yml).
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 if the document is valid, 1 if it is not.
pub fn run_validate(args: &ValidateArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    let document = load_document(&args.path)
        .with_context(|| format!("failed to load {}", args.path.display()))?;

    let result = validate_schema_with(args.schema, &document, &config.validation_options());
    tracing::info!(
        schema = %args.schema,
        path = %args.path.display(),
        violations = result.violations().len(),
        "validated document"
    );

    if args.json {
        write_json(out, config, &result.violations())?;
    } else {
        report(out, args, &result)?;
    }

    Ok(if result.is_valid() { 0 } else { 1 })
}

fn report(out: &mut dyn Write, args: &ValidateArgs, result: &ValidationResult) -> Result<()> {
    match result {
        ValidationResult::Valid => {
            writeln!(out, "OK: {} ({})", args.path.display(), args.schema)?;
        }
        ValidationResult::Invalid(violations) => {
            writeln!(
                out,
                "FAIL: {} ({}): {} violation(s)",
                args.path.display(),
                args.schema,
                violations.len()
            )?;
            for violation in violations {
                writeln!(out, "  {violation}")?;
            }
        }
    }
    Ok(())
}
