//! # Normalization
//!
//! Validates the schema-bound fields of a rolling stock record and projects
//! it into a [`CanonicalRecord`].
//!
//! ## Curve Selection
//!
//! The canonical record carries exactly one effort curve: the first entry of
//! `tractive_effort_curves` in insertion order. Curve names play no part in
//! the choice.
//!
//! The rolling resistance formula is copied into the output as supplied once
//! it has passed its schema check.

use rollingstock_core::{EffortCurve, RollingStockForm, RollingStockRecord};
use rollingstock_schema::{
    escape_token, validate_schema_with, SchemaId, ValidationOptions, Violation, ViolationReason,
};

use crate::canonical::{railjson_id, CanonicalRecord, GammaType};
use crate::error::ValidationError;

/// Switches for [`normalize_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Options passed to every schema check.
    pub validation: ValidationOptions,
}

/// Project `record` into its canonical railjson form with default options.
///
/// # Errors
///
/// See [`normalize_with`].
pub fn normalize(record: &RollingStockRecord) -> Result<CanonicalRecord, ValidationError> {
    normalize_with(record, &NormalizeOptions::default())
}

/// Project `record` into its canonical railjson form.
///
/// # Errors
///
/// - `ValidationError::RollingResistance` if the formula fails its schema.
/// - `ValidationError::EffortCurves` if any named curve fails its schema.
/// - `ValidationError::NoEffortCurve` if there are no curves.
/// - `ValidationError::PhysicalFields` if a scalar is NaN or infinite.
pub fn normalize_with(
    record: &RollingStockRecord,
    options: &NormalizeOptions,
) -> Result<CanonicalRecord, ValidationError> {
    project(record, options).map_err(|err| {
        tracing::debug!(
            rolling_stock = %record.identifier,
            error = %err,
            "rolling stock rejected"
        );
        err
    })
}

fn project(
    record: &RollingStockRecord,
    options: &NormalizeOptions,
) -> Result<CanonicalRecord, ValidationError> {
    let form = &record.form;
    validate_schema_with(
        SchemaId::RollingResistance,
        &form.rolling_resistance,
        &options.validation,
    )
    .into_result()
    .map_err(ValidationError::RollingResistance)?;

    validate_schema_with(
        SchemaId::EffortCurveMap,
        &form.tractive_effort_curves.to_value(),
        &options.validation,
    )
    .into_result()
    .map_err(ValidationError::EffortCurves)?;

    let Some((curve_name, curve)) = form.tractive_effort_curves.first() else {
        return Err(ValidationError::NoEffortCurve);
    };

    check_physical_fields(form)?;

    let tractive_effort_curve = EffortCurve::from_value(curve).map_err(|e| {
        ValidationError::EffortCurves(vec![Violation::new(
            format!("/{}", escape_token(curve_name)),
            ViolationReason::WrongType,
            e.to_string(),
        )])
    })?;

    tracing::debug!(
        rolling_stock = %record.identifier,
        curve = curve_name,
        samples = tractive_effort_curve.len(),
        available = form.tractive_effort_curves.len(),
        "selected tractive effort curve"
    );

    Ok(CanonicalRecord {
        id: railjson_id(record.identifier),
        length: form.length_m,
        mass: form.mass_kg,
        inertia_coefficient: form.inertia_coefficient,
        rolling_resistance: form.rolling_resistance.clone(),
        capabilities: form.capabilities.clone(),
        max_speed: form.max_speed_mps,
        startup_time: form.startup_time_s,
        startup_acceleration: form.startup_acceleration_mps2,
        comfort_acceleration: form.comfort_acceleration_mps2,
        gamma: form.timetable_gamma_mps2,
        gamma_type: GammaType::Const,
        tractive_effort_curve,
    })
}

fn check_physical_fields(form: &RollingStockForm) -> Result<(), ValidationError> {
    let violations: Vec<Violation> = form
        .physical_fields()
        .into_iter()
        .filter(|(_, value)| !value.is_finite())
        .map(|(name, value)| {
            Violation::new(
                format!("/{name}"),
                ViolationReason::NotFinite,
                format!("{value} is not a finite number"),
            )
        })
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::PhysicalFields(violations))
    }
}
