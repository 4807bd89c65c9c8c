//! Contract and document identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Four-digit contract identifier in `[1000, 9999]`.
///
/// Uniqueness is **not** guaranteed: ids are drawn uniformly without checking
/// existing contracts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ContractId(u16);

impl ContractId {
    /// Smallest valid contract id.
    pub const MIN: u16 = 1000;
    /// Largest valid contract id.
    pub const MAX: u16 = 9999;

    /// Create a contract id, or `None` when `value` is outside `[MIN, MAX]`.
    #[must_use]
    pub fn new(value: u16) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    /// Number of distinct ids.
    pub const SPAN: u16 = Self::MAX - Self::MIN + 1;

    /// Map any offset into range: `MIN + offset % SPAN`.
    #[must_use]
    pub fn from_offset(offset: u16) -> Self {
        Self(Self::MIN + offset % Self::SPAN)
    }

    /// Raw numeric value.
    #[must_use]
    pub fn value(self) -> u16 {
        self.0
    }
}

impl TryFrom<u16> for ContractId {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("contract id {value} outside 1000..=9999"))
    }
}

impl From<ContractId> for u16 {
    fn from(id: ContractId) -> Self {
        id.0
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.0)
    }
}

/// Identifier assigned to a document by the document store.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    const SYNTHETIC_PREFIX: &'static str = "local-";

    /// Wrap a store-assigned id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Locally generated stand-in for a document whose creation failed.
    #[must_use]
    pub fn synthetic() -> Self {
        Self(format!(
            "{}{}",
            Self::SYNTHETIC_PREFIX,
            Uuid::new_v4().simple()
        ))
    }

    /// Whether this id was generated locally rather than by the store.
    #[must_use]
    pub fn is_synthetic(&self) -> bool {
        self.0.starts_with(Self::SYNTHETIC_PREFIX)
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_id_bounds() {
        assert!(ContractId::new(999).is_none());
        assert!(ContractId::new(10_000).is_none());
        assert_eq!(ContractId::new(1000).map(ContractId::value), Some(1000));
        assert_eq!(ContractId::new(9999).map(ContractId::value), Some(9999));
    }

    #[test]
    fn test_contract_id_from_offset_wraps() {
        assert_eq!(ContractId::from_offset(0).value(), 1000);
        assert_eq!(ContractId::from_offset(8999).value(), 9999);
        assert_eq!(ContractId::from_offset(9000).value(), 1000);
        assert_eq!(ContractId::from_offset(u16::MAX).value(), 1000 + u16::MAX % 9000);
    }

    #[test]
    fn test_contract_id_display_is_four_digits() {
        let id = ContractId::new(9548).unwrap();
        assert_eq!(id.to_string(), "9548");
    }

    #[test]
    fn test_contract_id_rejects_out_of_range_on_deserialize() {
        let parsed: Result<ContractId, _> = serde_json::from_str("42");
        assert!(parsed.is_err());
        let parsed: ContractId = serde_json::from_str("1234").unwrap();
        assert_eq!(parsed.value(), 1234);
    }

    #[test]
    fn test_synthetic_document_ids() {
        let a = DocumentId::synthetic();
        let b = DocumentId::synthetic();
        assert!(a.is_synthetic());
        assert_ne!(a, b);
        assert!(!DocumentId::new("8123").is_synthetic());
    }
}
