//! # rollingstock-store — Rolling Stock Storage
//!
//! The storage collaborator of the rolling stock workspace. It owns
//! identifier assignment, name uniqueness, and the rule that nothing is
//! stored unless its schema-bound fields validate.
//!
//! [`RollingStockStore`] is the interface; [`InMemoryStore`] is the
//! in-process implementation used by tests and the `rsk` binary. Persistence
//! backends implement the same trait.
//!
//! ## Write Rules
//!
//! Both `create` and `update` apply, in order:
//!
//! 1. `name` must be non-empty.
//! 2. `rolling_resistance` must pass the `rolling_resistance` schema.
//! 3. `tractive_effort_curves` must pass the `effort_curve_map` schema.
//! 4. `name` must not belong to another record.
//!
//! An update replaces every attribute of the record except its identifier.

pub mod error;
pub mod memory;

pub use error::StoreError;
pub use memory::InMemoryStore;

use rollingstock_core::{RollingStockForm, RollingStockId, RollingStockRecord};

/// Create, read, update, and delete rolling stock records.
pub trait RollingStockStore: Send + Sync {
    /// Store a new record and return it with its assigned identifier.
    fn create(&self, form: RollingStockForm) -> Result<RollingStockRecord, StoreError>;

    /// Fetch a record by identifier.
    fn get(&self, id: RollingStockId) -> Result<RollingStockRecord, StoreError>;

    /// Replace every attribute of an existing record.
    fn update(
        &self,
        id: RollingStockId,
        form: RollingStockForm,
    ) -> Result<RollingStockRecord, StoreError>;

    /// Remove a record, returning what was stored.
    fn delete(&self, id: RollingStockId) -> Result<RollingStockRecord, StoreError>;

    /// All records, ordered by identifier.
    fn list(&self) -> Vec<RollingStockRecord>;

    /// Look a record up by its unique name.
    fn find_by_name(&self, name: &str) -> Option<RollingStockRecord>;
}
