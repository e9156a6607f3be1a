//! Translated projection of an item.

use crate::{GroupKey, Item, ItemKey, LanguageCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable snapshot of an item's attributes in one language.
///
/// `title` and `description` carry translated text when translation
/// succeeded and the source text otherwise. The snapshot never embeds the
/// item's own translation cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedView {
    pub group_key: GroupKey,
    pub item_key: ItemKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub language: LanguageCode,
}

impl TranslatedView {
    /// Builds a view from the item's current attributes with the given
    /// field values substituted.
    #[must_use]
    pub fn from_item(
        item: &Item,
        language: LanguageCode,
        title: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            group_key: item.group_key.clone(),
            item_key: item.item_key.clone(),
            title,
            description,
            rating: item.rating,
            owner: item.owner.clone(),
            created_at: item.created_at,
            language,
        }
    }

    /// Builds an untranslated view (all fields pass through).
    #[must_use]
    pub fn passthrough(item: &Item, language: LanguageCode) -> Self {
        Self::from_item(item, language, item.title.clone(), item.description.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemId;

    #[test]
    fn test_view_serializes_camel_case_without_cache() {
        let item = Item::new(ItemId::parse("group#books", "item#1").unwrap(), "seed")
            .with_title("Intro")
            .with_rating(4.0);
        let view = TranslatedView::from_item(
            &item,
            LanguageCode::parse("fr").unwrap(),
            Some("Introduction".to_string()),
            None,
        );

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["groupKey"], "group#books");
        assert_eq!(json["itemKey"], "item#1");
        assert_eq!(json["title"], "Introduction");
        assert_eq!(json["language"], "fr");
        assert!(json.get("description").is_none());
        assert!(json.get("translations").is_none());
    }
}
