//! Typed identifiers for catalog items.
//!
//! An item is addressed by a partition key (`GroupKey`) and a sort key
//! (`ItemKey`). Both are opaque, non-empty strings such as `group#books` and
//! `item#1`; the pair never changes once an item exists.

use crate::CatalogError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

/// Partition key grouping related items (one tenant or collection).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupKey(String);

impl GroupKey {
    /// Parses a group key, rejecting blank input.
    pub fn parse(raw: impl Into<String>) -> Result<Self, CatalogError> {
        non_blank("group key", raw.into()).map(Self)
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Sort key identifying an item within its group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemKey(String);

impl ItemKey {
    /// Parses an item key, rejecting blank input.
    pub fn parse(raw: impl Into<String>) -> Result<Self, CatalogError> {
        non_blank("item key", raw.into()).map(Self)
    }

    /// Generates a fresh `item#<uuid>` key.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("item#{}", Uuid::now_v7()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Composite identity of an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId {
    pub group_key: GroupKey,
    pub item_key: ItemKey,
}

impl ItemId {
    /// Creates an item id from already validated keys.
    #[must_use]
    pub const fn new(group_key: GroupKey, item_key: ItemKey) -> Self {
        Self { group_key, item_key }
    }

    /// Parses both path components.
    ///
    /// Fails with a validation error naming every missing component.
    pub fn parse(group_key: &str, item_key: &str) -> Result<Self, CatalogError> {
        match (GroupKey::parse(group_key), ItemKey::parse(item_key)) {
            (Ok(group_key), Ok(item_key)) => Ok(Self::new(group_key, item_key)),
            (Err(_), Err(_)) => Err(CatalogError::validation(
                "group key and item key are required",
            )),
            (Err(e), _) | (_, Err(e)) => Err(e),
        }
    }
}

impl Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.group_key, self.item_key)
    }
}

impl TryFrom<String> for GroupKey {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl TryFrom<String> for ItemKey {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<GroupKey> for String {
    fn from(key: GroupKey) -> Self {
        key.0
    }
}

impl From<ItemKey> for String {
    fn from(key: ItemKey) -> Self {
        key.0
    }
}

fn non_blank(what: &str, raw: String) -> Result<String, CatalogError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CatalogError::validation(format!("{} is required", what)));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_rejects_blank() {
        assert_eq!(GroupKey::parse("  group#books ").unwrap().as_str(), "group#books");
        assert!(GroupKey::parse("   ").is_err());
        assert!(ItemKey::parse("").is_err());
    }

    #[test]
    fn test_item_id_parse_reports_missing_components() {
        let err = ItemId::parse("", "").unwrap_err();
        assert!(err.to_string().contains("group key and item key"));

        let err = ItemId::parse("group#books", "").unwrap_err();
        assert!(err.to_string().contains("item key"));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_item_id_display() {
        let id = ItemId::parse("group#books", "item#1").unwrap();
        assert_eq!(id.to_string(), "group#books/item#1");
    }

    #[test]
    fn test_generated_item_keys_are_unique() {
        let a = ItemKey::generate();
        let b = ItemKey::generate();
        assert!(a.as_str().starts_with("item#"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_keys_reject_blank_on_deserialize() {
        assert!(serde_json::from_str::<GroupKey>("\"\"").is_err());
        let key: ItemKey = serde_json::from_str("\"item#7\"").unwrap();
        assert_eq!(key.as_str(), "item#7");
    }
}
