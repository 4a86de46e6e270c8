//! # Identifier Newtypes
//!
//! Wrappers for the identifiers a rolling stock record carries. The
//! storage layer assigns `RollingStockId`; `OwnerId` and `ImageRef` are
//! opaque handles owned by other collaborators and are passed through
//! untouched.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier assigned to a rolling stock record by the storage layer.
///
/// Immutable once assigned. Renders as the bare integer, which is the form
/// embedded in the railjson id (`rolling_stock.<id>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RollingStockId(pub i64);

impl RollingStockId {
    /// Wrap a raw storage identifier.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Access the raw integer.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for RollingStockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Owner of a rolling stock record.
///
/// Records created without an owner belong to [`OwnerId::UNOWNED`], the
/// all-zero UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(pub Uuid);

impl OwnerId {
    /// The "unowned" sentinel: `00000000-0000-0000-0000-000000000000`.
    pub const UNOWNED: OwnerId = OwnerId(Uuid::nil());

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Whether this is the unowned sentinel.
    pub fn is_unowned(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for OwnerId {
    fn default() -> Self {
        Self::UNOWNED
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "owner:{}", self.0)
    }
}

/// Opaque reference to an image held by the asset store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    /// Access the reference as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_defaults_to_nil_uuid() {
        let owner = OwnerId::default();
        assert!(owner.is_unowned());
        assert_eq!(
            owner.as_uuid().to_string(),
            "00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn random_owner_is_not_unowned() {
        assert!(!OwnerId(Uuid::new_v4()).is_unowned());
    }

    #[test]
    fn rolling_stock_id_displays_bare_integer() {
        assert_eq!(RollingStockId::new(42).to_string(), "42");
    }

    #[test]
    fn identifiers_serialize_transparently() {
        assert_eq!(serde_json::to_value(RollingStockId(7)).unwrap(), 7);
        assert_eq!(
            serde_json::to_value(ImageRef("img/loco.png".into())).unwrap(),
            "img/loco.png"
        );
    }
}
