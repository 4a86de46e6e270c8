//! # Tractive Effort Curves
//!
//! An effort curve samples the maximum tractive effort (N) a unit can
//! produce at a given speed (m/s). A rolling stock carries several named
//! curves, one per operating configuration, in an [`EffortCurveMap`].
//!
//! ## Ordering
//!
//! The simulator receives exactly one curve: the first entry of the map.
//! `EffortCurveMap` therefore keeps entries in insertion order, and its
//! `Deserialize` impl keeps them in document order. Callers that need a
//! specific curve selected must put it first.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::error::ModelError;

/// One `(speed, max_effort)` sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffortSample {
    /// Speed in m/s.
    pub speed: f64,
    /// Maximum tractive effort at `speed`, in newtons.
    pub max_effort: f64,
}

/// An ordered sequence of effort samples.
///
/// Samples are kept in the order supplied; speeds are not required to be
/// monotonic here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EffortCurve(pub Vec<EffortSample>);

impl EffortCurve {
    /// Build a typed curve from a raw value that already passed schema
    /// validation.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::Malformed` if the value is not an array of
    /// `{speed, max_effort}` objects.
    pub fn from_value(value: &Value) -> Result<Self, ModelError> {
        Self::deserialize(value).map_err(|source| ModelError::Malformed {
            field: "tractive_effort_curves",
            source,
        })
    }

    /// The samples, in order.
    pub fn samples(&self) -> &[EffortSample] {
        &self.0
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the curve has no samples.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Largest `max_effort` over all samples, or `None` for an empty curve.
    pub fn max_effort(&self) -> Option<f64> {
        self.0.iter().map(|s| s.max_effort).reduce(f64::max)
    }
}

/// Named effort curves, kept in insertion order.
///
/// Values are raw JSON until validated against the effort curve schema.
/// Inserting an existing name replaces its value without moving it.
///
/// Deserialization keeps the order in which the deserializer yields keys.
/// Text formats (`serde_json::from_str`, `serde_yaml::from_str`) yield
/// document order. A `serde_json::Value` yields its keys sorted, so
/// `serde_json::from_value` produces a lexically ordered map; build maps
/// from text, or with [`EffortCurveMap::insert`], when order matters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffortCurveMap {
    entries: Vec<(String, Value)>,
}

impl EffortCurveMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a named curve. Returns the previous value if the
    /// name was already present.
    pub fn insert(&mut self, name: impl Into<String>, curve: Value) -> Option<Value> {
        let name = name.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, curve)),
            None => {
                self.entries.push((name, curve));
                None
            }
        }
    }

    /// Look up a curve by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    /// The first inserted entry.
    pub fn first(&self) -> Option<(&str, &Value)> {
        self.entries.first().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate over `(name, curve)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Curve names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Number of named curves.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no curves.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The map as a JSON object, for schema validation.
    ///
    /// `serde_json::Map` does not keep insertion order, so this view must not
    /// be used for curve selection.
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.entries
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for EffortCurveMap {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, curve) in iter {
            map.insert(name, curve);
        }
        map
    }
}

impl Serialize for EffortCurveMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, curve) in &self.entries {
            map.serialize_entry(name, curve)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EffortCurveMap {
    fn deserialize<D>(deserializer: D) -> Result<EffortCurveMap, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EffortCurveMapVisitor;

        impl<'de> Visitor<'de> for EffortCurveMapVisitor {
            type Value = EffortCurveMap;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of curve name to effort curve")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut map = EffortCurveMap::new();
                while let Some((name, curve)) = access.next_entry::<String, Value>()? {
                    map.insert(name, curve);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(EffortCurveMapVisitor)
    }
}
