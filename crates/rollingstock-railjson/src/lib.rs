//! # rollingstock-railjson — Canonical Railjson Projection
//!
//! Turns a candidate [`RollingStockRecord`](rollingstock_core::RollingStockRecord)
//! into the [`CanonicalRecord`] handed to the simulation engine.
//!
//! ## Pipeline
//!
//! 1. `rolling_resistance` is checked against the Davis formula schema.
//! 2. `tractive_effort_curves` is checked against the effort curve map schema.
//! 3. An empty curve map is rejected.
//! 4. Every scalar physical field must be finite.
//! 5. The first-inserted effort curve is selected and the record assembled.
//!
//! [`normalize`] is all-or-nothing: it returns either a complete canonical
//! record or a [`ValidationError`] carrying every violation found by the
//! failing step.

pub mod canonical;
pub mod error;
pub mod normalize;

pub use canonical::{CanonicalRecord, GammaType};
pub use error::ValidationError;
pub use normalize::{normalize, normalize_with, NormalizeOptions};
