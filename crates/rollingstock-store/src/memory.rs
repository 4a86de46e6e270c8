//! # In-Memory Store
//!
//! A `RollingStockStore` backed by a `BTreeMap` behind a
//! `parking_lot::RwLock`. Clones share the same underlying map, so a store
//! can be handed to several threads.
//!
//! Identifier assignment and the uniqueness check run under the same write
//! lock as the insert itself; two concurrent creates with the same name
//! cannot both succeed.
//!
//! Writes are checked with the same string length limits as the
//! `rolling_stock` schema.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use rollingstock_core::{RollingStockForm, RollingStockId, RollingStockRecord};
use rollingstock_schema::{
    validate, validate_schema, Schema, SchemaId, CAPABILITY_MAX_LENGTH, NAME_MAX_LENGTH,
    TRACTION_MODE_MAX_LENGTH,
};
use serde_json::Value;

use crate::error::StoreError;
use crate::RollingStockStore;

#[derive(Debug, Default)]
struct Inner {
    records: BTreeMap<RollingStockId, RollingStockRecord>,
    last_id: i64,
}

impl Inner {
    fn name_taken(&self, name: &str, except: Option<RollingStockId>) -> bool {
        self.records
            .values()
            .any(|r| r.form.name == name && Some(r.identifier) != except)
    }
}

/// Thread-safe, cloneable in-memory rolling stock store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryStore {
    /// Create an empty store. The first record created gets identifier 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.inner.read().records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RollingStockStore for InMemoryStore {
    fn create(&self, form: RollingStockForm) -> Result<RollingStockRecord, StoreError> {
        check_form(&form)?;

        let mut inner = self.inner.write();
        if inner.name_taken(&form.name, None) {
            return Err(StoreError::DuplicateName(form.name));
        }
        inner.last_id += 1;
        let record = RollingStockRecord::new(RollingStockId(inner.last_id), form);
        inner.records.insert(record.identifier, record.clone());

        tracing::info!(
            rolling_stock = %record.identifier,
            name = %record.form.name,
            "rolling stock created"
        );
        Ok(record)
    }

    fn get(&self, id: RollingStockId) -> Result<RollingStockRecord, StoreError> {
        self.inner
            .read()
            .records
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn update(
        &self,
        id: RollingStockId,
        form: RollingStockForm,
    ) -> Result<RollingStockRecord, StoreError> {
        check_form(&form)?;

        let mut inner = self.inner.write();
        if !inner.records.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        if inner.name_taken(&form.name, Some(id)) {
            return Err(StoreError::DuplicateName(form.name));
        }
        let record = RollingStockRecord::new(id, form);
        inner.records.insert(id, record.clone());

        tracing::info!(rolling_stock = %id, name = %record.form.name, "rolling stock updated");
        Ok(record)
    }

    fn delete(&self, id: RollingStockId) -> Result<RollingStockRecord, StoreError> {
        let removed = self
            .inner
            .write()
            .records
            .remove(&id)
            .ok_or(StoreError::NotFound(id))?;
        tracing::info!(rolling_stock = %id, "rolling stock deleted");
        Ok(removed)
    }

    fn list(&self) -> Vec<RollingStockRecord> {
        self.inner.read().records.values().cloned().collect()
    }

    fn find_by_name(&self, name: &str) -> Option<RollingStockRecord> {
        self.inner
            .read()
            .records
            .values()
            .find(|r| r.form.name == name)
            .cloned()
    }
}

fn check_form(form: &RollingStockForm) -> Result<(), StoreError> {
    if form.name.trim().is_empty() {
        return Err(StoreError::EmptyName);
    }
    check_field("name", &Schema::string_up_to(NAME_MAX_LENGTH), &form.name.as_str().into())?;
    check_field(
        "traction_mode",
        &Schema::string_up_to(TRACTION_MODE_MAX_LENGTH),
        &form.traction_mode.as_str().into(),
    )?;
    check_field(
        "capabilities",
        &Schema::array_of(Schema::string_up_to(CAPABILITY_MAX_LENGTH)),
        &form.capabilities.clone().into(),
    )?;
    validate_schema(SchemaId::RollingResistance, &form.rolling_resistance)
        .into_result()
        .map_err(|violations| StoreError::Invalid {
            field: "rolling_resistance",
            violations,
        })?;
    validate_schema(
        SchemaId::EffortCurveMap,
        &form.tractive_effort_curves.to_value(),
    )
    .into_result()
    .map_err(|violations| StoreError::Invalid {
        field: "tractive_effort_curves",
        violations,
    })
}

fn check_field(field: &'static str, schema: &Schema, value: &Value) -> Result<(), StoreError> {
    validate(schema, value)
        .into_result()
        .map_err(|violations| StoreError::Invalid { field, violations })
}
