//! # Schema Subcommand
//!
//! Prints a built-in schema as a JSON Schema document, for use by editors
//! and other validators.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use rollingstock_schema::SchemaId;

use crate::config::CliConfig;
use crate::write_json;

/// Arguments for the `rsk schema` subcommand.
#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Built-in schema to export.
    #[arg(value_name = "ID")]
    pub schema: SchemaId,
}

/// Execute the schema subcommand. Always returns exit code 0.
pub fn run_schema(args: &SchemaArgs, config: &CliConfig, out: &mut dyn Write) -> Result<u8> {
    write_json(out, config, &args.schema.schema().to_json_schema())?;
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn exports_rolling_resistance() {
        let config = CliConfig {
            output: OutputFormat::Compact,
            ..CliConfig::default()
        };
        let mut out = Vec::new();
        let args = SchemaArgs {
            schema: SchemaId::RollingResistance,
        };
        assert_eq!(run_schema(&args, &config, &mut out).unwrap(), 0);

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 1);
        let exported: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(exported["properties"]["type"]["const"], "davis");
        assert_eq!(exported["required"][3], "C");
    }
}
