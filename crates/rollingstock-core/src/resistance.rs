//! # Rolling Resistance
//!
//! The Davis formula `R(v) = A + B·v + C·v²` is the only rolling resistance
//! model the simulator accepts. `A` is solid friction (N), `B` viscous
//! friction (N·s/m), and `C` aerodynamic drag (N·s²/m²).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ModelError;

/// A rolling resistance formula, tagged by `type` on the wire.
///
/// Serializes as `{"type": "davis", "A": .., "B": .., "C": ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RollingResistance {
    /// Davis quadratic drag model.
    Davis {
        /// Constant term, in newtons.
        #[serde(rename = "A")]
        a: f64,
        /// Linear term, in N per m/s.
        #[serde(rename = "B")]
        b: f64,
        /// Quadratic term, in N per (m/s)².
        #[serde(rename = "C")]
        c: f64,
    },
}

impl RollingResistance {
    /// Build a Davis formula from its three coefficients.
    pub fn davis(a: f64, b: f64, c: f64) -> Self {
        Self::Davis { a, b, c }
    }

    /// Build a typed formula from a raw value that already passed schema
    /// validation. Unknown extra keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Malformed` if the value is not a Davis formula.
    pub fn from_value(value: &Value) -> Result<Self, ModelError> {
        Self::deserialize(value).map_err(|source| ModelError::Malformed {
            field: "rolling_resistance",
            source,
        })
    }

    /// The `(A, B, C)` coefficients.
    pub fn coefficients(&self) -> (f64, f64, f64) {
        match *self {
            Self::Davis { a, b, c } => (a, b, c),
        }
    }

    /// Resistance force in newtons at `speed` m/s.
    pub fn resistance_at(&self, speed: f64) -> f64 {
        let (a, b, c) = self.coefficients();
        a + b * speed + c * speed * speed
    }
}
