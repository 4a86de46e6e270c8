//! # Canonical Railjson Record
//!
//! The simulator-facing description of one rolling stock unit. Field names
//! and their order are part of the contract with the simulation engine.
//!
//! `rolling_resistance` is the validated formula object exactly as supplied,
//! including any keys the schema does not declare and the number
//! representation of each coefficient.

use rollingstock_core::{EffortCurve, ModelError, RollingResistance, RollingStockId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Prefix of every railjson rolling stock id.
pub const RAILJSON_ID_PREFIX: &str = "rolling_stock.";

/// Railjson id of a stored record: `rolling_stock.<identifier>`.
pub fn railjson_id(identifier: RollingStockId) -> String {
    format!("{RAILJSON_ID_PREFIX}{identifier}")
}

/// Braking model of the timetable gamma.
///
/// Only constant braking is representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GammaType {
    #[default]
    #[serde(rename = "CONST")]
    Const,
}

/// A rolling stock unit as consumed by the simulation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    /// `rolling_stock.<identifier>`.
    pub id: String,
    pub length: f64,
    pub mass: f64,
    pub inertia_coefficient: f64,
    /// The formula object, passed through unchanged.
    pub rolling_resistance: Value,
    pub capabilities: Vec<String>,
    pub max_speed: f64,
    pub startup_time: f64,
    pub startup_acceleration: f64,
    pub comfort_acceleration: f64,
    /// Timetable braking coefficient, in m/s².
    pub gamma: f64,
    pub gamma_type: GammaType,
    /// The single selected effort curve.
    pub tractive_effort_curve: EffortCurve,
}

impl CanonicalRecord {
    /// Typed view of the rolling resistance formula.
    pub fn resistance(&self) -> Result<RollingResistance, ModelError> {
        RollingResistance::from_value(&self.rolling_resistance)
    }
}
