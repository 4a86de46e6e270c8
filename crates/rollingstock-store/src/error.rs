//! # Storage Errors

use rollingstock_core::RollingStockId;
use rollingstock_schema::Violation;
use thiserror::Error;

/// Why a storage operation was refused.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("rolling stock name must not be empty")]
    EmptyName,

    #[error("a rolling stock named {0:?} already exists")]
    DuplicateName(String),

    /// A schema-bound field failed validation.
    #[error("invalid {field}: {}", render(.violations))]
    Invalid {
        field: &'static str,
        violations: Vec<Violation>,
    },

    #[error("rolling stock {0} not found")]
    NotFound(RollingStockId),
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
