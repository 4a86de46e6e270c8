//! Integration tests: the store through its trait object, under concurrent
//! writers, and against arbitrary create/delete sequences.

use std::collections::BTreeSet;
use std::thread;

use proptest::prelude::*;
use rollingstock_core::{RollingStockForm, RollingStockId};
use rollingstock_store::{InMemoryStore, RollingStockStore, StoreError};
use serde_json::json;

fn form(name: &str) -> RollingStockForm {
    serde_json::from_value(json!({
        "name": name,
        "length_m": 400.0,
        "mass_kg": 900000.0,
        "inertia_coefficient": 1.05,
        "max_speed_mps": 83.3,
        "startup_time_s": 10.0,
        "startup_acceleration_mps2": 0.04,
        "comfort_acceleration_mps2": 0.1,
        "timetable_gamma_mps2": 0.5,
        "rolling_resistance": {"type": "davis", "A": 1.0, "B": 0.02, "C": 0.0003},
        "capabilities": ["TVM300", "TVM430"],
        "tractive_effort_curves": {"default": [{"speed": 0, "max_effort": 500}]},
        "traction_mode": "electric",
        "power_class": 5
    }))
    .unwrap()
}

#[test]
fn full_lifecycle_through_trait_object() {
    let store: Box<dyn RollingStockStore> = Box::new(InMemoryStore::new());

    let created = store.create(form("TGV Duplex")).unwrap();
    assert!(created.form.owner.is_unowned());
    assert_eq!(store.find_by_name("TGV Duplex").unwrap(), created);

    let mut replacement = form("TGV Duplex");
    replacement.capabilities = vec!["ETCS".into()];
    let updated = store.update(created.identifier, replacement).unwrap();
    assert_eq!(updated.form.capabilities, ["ETCS"]);

    assert_eq!(store.delete(created.identifier).unwrap(), updated);
    assert!(store.list().is_empty());
    assert!(store.find_by_name("TGV Duplex").is_none());
}

#[test]
fn concurrent_creates_with_same_name_admit_one() {
    let store = InMemoryStore::new();
    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| s.spawn(|| store.create(form("BB 7200"))))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| *e == StoreError::DuplicateName("BB 7200".into())));
    assert_eq!(store.len(), 1);
}

#[test]
fn concurrent_creates_get_distinct_identifiers() {
    let store = InMemoryStore::new();
    thread::scope(|s| {
        for i in 0..16 {
            let store = &store;
            s.spawn(move || store.create(form(&format!("unit-{i}"))).unwrap());
        }
    });

    let ids: BTreeSet<RollingStockId> = store.list().iter().map(|r| r.identifier).collect();
    assert_eq!(ids, (1..=16).map(RollingStockId).collect());
}

proptest! {
    /// Identifiers grow strictly, whatever was deleted in between.
    #[test]
    fn identifiers_strictly_increase(deletes in prop::collection::vec(any::<bool>(), 1..20)) {
        let store = InMemoryStore::new();
        let mut last = RollingStockId(0);
        for (i, delete) in deletes.into_iter().enumerate() {
            let record = store.create(form(&format!("unit-{i}"))).unwrap();
            prop_assert!(record.identifier > last);
            last = record.identifier;
            if delete {
                store.delete(record.identifier).unwrap();
            }
        }
    }
}
