//! # Built-in Schemas
//!
//! The schemas a rolling stock document is checked against, addressed by
//! [`SchemaId`]. Each tree is built on first use and then shared read-only
//! for the life of the process.
//!
//! | Id                   | Shape                                              |
//! |----------------------|----------------------------------------------------|
//! | `rolling_resistance` | `{type: "davis", A >= 0, B >= 0, C >= 0}`          |
//! | `effort_curve`       | non-empty `[{speed: number, max_effort: number}]`  |
//! | `effort_curve_map`   | `{<name>: effort_curve}`                           |
//! | `rolling_stock`      | a whole rolling stock form                         |
//!
//! Length limits in `rolling_stock` count characters: `name` 1..=255,
//! `traction_mode` up to 128, each capability up to 255.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde_json::Value;

use crate::error::SchemaError;
use crate::schema::{ObjectSchema, Schema};
use crate::validate::{validate_with, ValidationOptions, ValidationResult};

/// Identifier of a built-in schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaId {
    RollingResistance,
    EffortCurve,
    EffortCurveMap,
    RollingStock,
}

impl SchemaId {
    /// Every built-in schema.
    pub const ALL: [SchemaId; 4] = [
        SchemaId::RollingResistance,
        SchemaId::EffortCurve,
        SchemaId::EffortCurveMap,
        SchemaId::RollingStock,
    ];

    /// The snake_case name used on the command line and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RollingResistance => "rolling_resistance",
            Self::EffortCurve => "effort_curve",
            Self::EffortCurveMap => "effort_curve_map",
            Self::RollingStock => "rolling_stock",
        }
    }

    /// The schema tree.
    pub fn schema(&self) -> &'static Schema {
        match self {
            Self::RollingResistance => rolling_resistance(),
            Self::EffortCurve => effort_curve(),
            Self::EffortCurveMap => effort_curve_map(),
            Self::RollingStock => rolling_stock(),
        }
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaId {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownSchema(s.to_string()))
    }
}

/// Validate `value` against a built-in schema with default options.
pub fn validate_schema(id: SchemaId, value: &Value) -> ValidationResult {
    validate_schema_with(id, value, &ValidationOptions::default())
}

/// Validate `value` against a built-in schema with explicit options.
pub fn validate_schema_with(
    id: SchemaId,
    value: &Value,
    options: &ValidationOptions,
) -> ValidationResult {
    validate_with(id.schema(), value, options)
}

/// Davis formula: the only accepted `type` is `"davis"`, and every
/// coefficient is a non-negative number.
pub fn rolling_resistance() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        ObjectSchema::new()
            .required("type", Schema::constant("davis"))
            .required("A", Schema::number_at_least(0.0))
            .required("B", Schema::number_at_least(0.0))
            .required("C", Schema::number_at_least(0.0))
            .into()
    })
}

/// One tractive effort curve.
pub fn effort_curve() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        Schema::non_empty_array_of(
            ObjectSchema::new()
                .required("speed", Schema::number())
                .required("max_effort", Schema::number())
                .into(),
        )
    })
}

/// Named effort curves. An empty map satisfies this schema; normalization
/// rejects it separately.
pub fn effort_curve_map() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| Schema::map_of(effort_curve().clone()))
}

/// Longest accepted rolling stock name.
pub const NAME_MAX_LENGTH: usize = 255;
/// Longest accepted traction mode.
pub const TRACTION_MODE_MAX_LENGTH: usize = 128;
/// Longest accepted capability label.
pub const CAPABILITY_MAX_LENGTH: usize = 255;

/// A complete rolling stock form as supplied on create or update.
///
/// `owner`, when present, must be a hyphenated UUID.
pub fn rolling_stock() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        ObjectSchema::new()
            .required("name", Schema::bounded_string(1, NAME_MAX_LENGTH))
            .required("length_m", Schema::number())
            .required("mass_kg", Schema::number())
            .required("inertia_coefficient", Schema::number())
            .required("max_speed_mps", Schema::number())
            .required("startup_time_s", Schema::number())
            .required("startup_acceleration_mps2", Schema::number())
            .required("comfort_acceleration_mps2", Schema::number())
            .required("timetable_gamma_mps2", Schema::number())
            .required("rolling_resistance", rolling_resistance().clone())
            .required(
                "capabilities",
                Schema::array_of(Schema::string_up_to(CAPABILITY_MAX_LENGTH)),
            )
            .required("tractive_effort_curves", effort_curve_map().clone())
            .required("traction_mode", Schema::string_up_to(TRACTION_MODE_MAX_LENGTH))
            .required("power_class", Schema::integer_at_least(0.0))
            .optional("owner", Schema::uuid())
            .optional("image", Schema::string())
            .into()
    })
}
