//! # rollingstock-core — Rolling Stock Domain Types
//!
//! Defines the in-memory representation of a rolling stock unit as supplied
//! by a caller, before any schema validation has happened. Every other crate
//! in the workspace depends on `rollingstock-core`; it depends on nothing
//! internal.
//!
//! ## Key Design Principles
//!
//! 1. **Raw schema-bound fields.** `rolling_resistance` and the values of
//!    `tractive_effort_curves` are kept as `serde_json::Value` until the
//!    schema validator has accepted them. Typed views (`RollingResistance`,
//!    `EffortCurve`) are only built from validated values.
//!
//! 2. **Insertion order is data.** `EffortCurveMap` keeps its entries in the
//!    order they were inserted or appeared in the source document. The first
//!    entry is the one carried into the canonical railjson record.
//!
//! 3. **Newtype identifiers.** `RollingStockId`, `OwnerId`, and `ImageRef`
//!    cannot be confused with each other or with bare strings.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `rollingstock-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod curve;
pub mod error;
pub mod identity;
pub mod record;
pub mod resistance;

pub use curve::{EffortCurve, EffortCurveMap, EffortSample};
pub use error::ModelError;
pub use identity::{ImageRef, OwnerId, RollingStockId};
pub use record::{RollingStockForm, RollingStockRecord};
pub use resistance::RollingResistance;
