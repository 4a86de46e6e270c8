//! # Normalization Errors
//!
//! Every variant is a data error: the same input always fails the same way,
//! and only corrected input changes the outcome.

use rollingstock_schema::Violation;
use thiserror::Error;

/// Why a record could not be projected into a canonical railjson record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `rolling_resistance` failed the Davis formula schema.
    #[error("invalid rolling resistance: {}", render(.0))]
    RollingResistance(Vec<Violation>),

    /// At least one entry of `tractive_effort_curves` failed the effort
    /// curve schema.
    #[error("invalid tractive effort curves: {}", render(.0))]
    EffortCurves(Vec<Violation>),

    /// `tractive_effort_curves` is empty, so no curve can be selected.
    #[error("no tractive effort curve to select")]
    NoEffortCurve,

    /// A scalar physical field is NaN or infinite.
    #[error("invalid physical fields: {}", render(.0))]
    PhysicalFields(Vec<Violation>),
}

impl ValidationError {
    /// The violations carried by this error; empty for `NoEffortCurve`.
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::RollingResistance(v) | Self::EffortCurves(v) | Self::PhysicalFields(v) => v,
            Self::NoEffortCurve => &[],
        }
    }
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
