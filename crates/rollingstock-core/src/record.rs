//! # Rolling Stock Records
//!
//! `RollingStockForm` carries every attribute a caller supplies on create
//! or update. `RollingStockRecord` adds the identifier assigned by storage
//! and serializes flat, with the identifier next to the attributes.
//!
//! Scalar fields use unit-suffixed names (`length_m`, `mass_kg`, ...) and
//! only those; the `rolling_stock` schema declares the same names.
//!
//! Curve order in `tractive_effort_curves` is the order the deserializer
//! yields keys. Load records from JSON or YAML text; `serde_json::from_value`
//! sorts the curve names (see [`EffortCurveMap`]).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::curve::EffortCurveMap;
use crate::identity::{ImageRef, OwnerId, RollingStockId};

/// Caller-supplied attributes of one rolling stock unit.
///
/// Deserialize from text to keep curve order; a `serde_json::Value` source
/// yields the curves sorted by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingStockForm {
    /// Unique, non-empty display name.
    pub name: String,
    /// Owner; the unowned sentinel when absent.
    #[serde(default)]
    pub owner: OwnerId,
    /// Train length, in meters.
    pub length_m: f64,
    /// Train mass, in kilograms.
    pub mass_kg: f64,
    /// Multiplied with the mass to get the effective mass.
    pub inertia_coefficient: f64,
    /// Maximum operational speed, in m/s.
    pub max_speed_mps: f64,
    /// Time before the train can start accelerating, in seconds.
    pub startup_time_s: f64,
    /// Maximum acceleration during startup, in m/s².
    pub startup_acceleration_mps2: f64,
    /// Maximum operational acceleration, in m/s².
    pub comfort_acceleration_mps2: f64,
    /// Maximum braking coefficient for timetabling, in m/s².
    pub timetable_gamma_mps2: f64,
    /// Raw rolling resistance formula.
    pub rolling_resistance: Value,
    /// Free-form capability tags, e.g. supported signalling systems.
    pub capabilities: Vec<String>,
    /// Named tractive effort curves, in insertion order.
    pub tractive_effort_curves: EffortCurveMap,
    pub traction_mode: String,
    pub power_class: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageRef>,
}

impl RollingStockForm {
    /// The scalar physical quantities, keyed by field name.
    pub fn physical_fields(&self) -> [(&'static str, f64); 8] {
        [
            ("length_m", self.length_m),
            ("mass_kg", self.mass_kg),
            ("inertia_coefficient", self.inertia_coefficient),
            ("max_speed_mps", self.max_speed_mps),
            ("startup_time_s", self.startup_time_s),
            ("startup_acceleration_mps2", self.startup_acceleration_mps2),
            ("comfort_acceleration_mps2", self.comfort_acceleration_mps2),
            ("timetable_gamma_mps2", self.timetable_gamma_mps2),
        ]
    }
}

/// A stored rolling stock unit: identifier plus attributes.
///
/// Like [`RollingStockForm`], only text sources keep curve order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingStockRecord {
    /// Assigned by storage on creation.
    #[serde(alias = "id")]
    pub identifier: RollingStockId,
    #[serde(flatten)]
    pub form: RollingStockForm,
}

impl RollingStockRecord {
    /// Attach a storage identifier to a form.
    pub fn new(identifier: RollingStockId, form: RollingStockForm) -> Self {
        Self { identifier, form }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const DOCUMENT: &str = r#"{
        "identifier": 3,
        "name": "BB 7200",
        "length_m": 20.2,
        "mass_kg": 84000,
        "inertia_coefficient": 1.05,
        "max_speed_mps": 44.4,
        "startup_time_s": 5,
        "startup_acceleration_mps2": 0.05,
        "comfort_acceleration_mps2": 0.25,
        "timetable_gamma_mps2": 0.5,
        "rolling_resistance": {"type": "davis", "A": 1.0, "B": 0.02, "C": 0.0003},
        "capabilities": ["ETCS", "TVM"],
        "tractive_effort_curves": {
            "25000V": [{"speed": 0, "max_effort": 290000}],
            "1500V": [{"speed": 0, "max_effort": 180000}]
        },
        "traction_mode": "electric",
        "power_class": 5
    }"#;

    fn record() -> RollingStockRecord {
        serde_json::from_str(DOCUMENT).unwrap()
    }

    #[test]
    fn deserializes_flat_document() {
        let record = record();
        assert_eq!(record.identifier, RollingStockId(3));
        assert_eq!(record.form.name, "BB 7200");
        assert_eq!(record.form.mass_kg, 84000.0);
        assert!(record.form.owner.is_unowned());
        assert_eq!(record.form.image, None);
        let names: Vec<&str> = record.form.tractive_effort_curves.names().collect();
        assert_eq!(names, ["25000V", "1500V"]);
    }

    #[test]
    fn json_value_source_sorts_curve_names() {
        let value: Value = serde_json::from_str(DOCUMENT).unwrap();
        let record: RollingStockRecord = serde_json::from_value(value).unwrap();
        let names: Vec<&str> = record.form.tractive_effort_curves.names().collect();
        assert_eq!(names, ["1500V", "25000V"]);
    }

    #[test]
    fn short_field_names_are_not_accepted() {
        let mut value: Value = serde_json::from_str(DOCUMENT).unwrap();
        let object = value.as_object_mut().unwrap();
        let length = object.remove("length_m").unwrap();
        object.insert("length".into(), length);
        let err = serde_json::from_value::<RollingStockRecord>(value).unwrap_err();
        assert!(err.to_string().contains("length_m"), "{err}");
    }

    #[test]
    fn physical_fields_cover_all_scalars() {
        let fields = record().form.physical_fields();
        assert_eq!(fields[0], ("length_m", 20.2));
        assert_eq!(fields[7], ("timetable_gamma_mps2", 0.5));
    }

    #[test]
    fn serializes_identifier_next_to_attributes() {
        let value = serde_json::to_value(record()).unwrap();
        assert_eq!(value["identifier"], 3);
        assert_eq!(value["owner"], "00000000-0000-0000-0000-000000000000");
        assert!(value.get("image").is_none());
        assert_eq!(value["tractive_effort_curves"], json!({
            "25000V": [{"speed": 0, "max_effort": 290000}],
            "1500V": [{"speed": 0, "max_effort": 180000}]
        }));
    }
}
