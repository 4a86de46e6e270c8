//! # CLI Configuration
//!
//! Settings shared by every subcommand. Sources, lowest precedence first:
//!
//! 1. Built-in defaults.
//! 2. The YAML file passed with `--config`.
//! 3. Environment variables:
//!    - `ROLLINGSTOCK_STRICT_SCHEMA` (`true`/`false`/`1`/`0`)
//!    - `ROLLINGSTOCK_FAIL_FAST` (`true`/`false`/`1`/`0`)
//!    - `ROLLINGSTOCK_OUTPUT` (`pretty`/`compact`)

use std::path::{Path, PathBuf};
use std::str::FromStr;

use rollingstock_railjson::NormalizeOptions;
use rollingstock_schema::ValidationOptions;
use serde::Deserialize;

pub const STRICT_SCHEMA_VAR: &str = "ROLLINGSTOCK_STRICT_SCHEMA";
pub const FAIL_FAST_VAR: &str = "ROLLINGSTOCK_FAIL_FAST";
pub const OUTPUT_VAR: &str = "ROLLINGSTOCK_OUTPUT";

/// JSON layout for command output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

impl FromStr for OutputFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            _ => Err(()),
        }
    }
}

/// Resolved CLI settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Report undeclared object keys as violations.
    pub strict_schema: bool,
    /// Stop each schema check at its first violation.
    pub fail_fast: bool,
    pub output: OutputFormat,
}

impl CliConfig {
    /// Load defaults, then `path` if given, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_env(|var| std::env::var(var).ok())
    }

    /// Parse a YAML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment overrides read through `lookup`.
    pub fn with_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(raw) = lookup(STRICT_SCHEMA_VAR) {
            self.strict_schema = parse_bool(STRICT_SCHEMA_VAR, &raw)?;
        }
        if let Some(raw) = lookup(FAIL_FAST_VAR) {
            self.fail_fast = parse_bool(FAIL_FAST_VAR, &raw)?;
        }
        if let Some(raw) = lookup(OUTPUT_VAR) {
            self.output = raw
                .trim()
                .to_ascii_lowercase()
                .parse()
                .map_err(|()| invalid(OUTPUT_VAR, &raw))?;
        }
        Ok(self)
    }

    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            strict: self.strict_schema,
            fail_fast: self.fail_fast,
        }
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            validation: self.validation_options(),
        }
    }
}

fn parse_bool(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" | "" => Ok(false),
        _ => Err(invalid(var, raw)),
    }
}

fn invalid(var: &'static str, raw: &str) -> ConfigError {
    ConfigError::InvalidValue {
        var,
        value: raw.to_string(),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },
}
