//! # rsk CLI entry point
//!
//! Parses command-line arguments, resolves configuration, and dispatches to
//! subcommand handlers.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rollingstock_cli::config::CliConfig;
use rollingstock_cli::normalize::{run_normalize, NormalizeArgs};
use rollingstock_cli::schema::{run_schema, SchemaArgs};
use rollingstock_cli::validate::{run_validate, ValidateArgs};

/// Rolling stock railjson toolchain.
///
/// Validates rolling stock documents against the built-in schemas and
/// projects them into the canonical railjson record read by the train
/// simulation engine.
#[derive(Parser, Debug)]
#[command(name = "rsk", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a YAML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a document against a built-in schema.
    Validate(ValidateArgs),

    /// Project a rolling stock document into canonical railjson.
    Normalize(NormalizeArgs),

    /// Print a built-in schema as JSON Schema.
    Schema(SchemaArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = CliConfig::load(cli.config.as_deref())
        .context("failed to load configuration")
        .and_then(|config| {
            tracing::debug!(?config, "resolved configuration");
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            let code = match &cli.command {
                Commands::Validate(args) => run_validate(args, &config, &mut out),
                Commands::Normalize(args) => run_normalize(args, &config, &mut out),
                Commands::Schema(args) => run_schema(args, &config, &mut out),
            }?;
            out.flush().context("failed to flush output")?;
            Ok(code)
        });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
