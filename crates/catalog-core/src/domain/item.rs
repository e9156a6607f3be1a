//! Item aggregate.

use crate::{
    GroupKey, ItemId, ItemKey, ItemUpdate, LanguageCode, TranslatedView, TranslationsUpdate,
    UpdateCondition,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Owner recorded when an item is created without a requester identity.
pub const ANONYMOUS_OWNER: &str = "anonymous";

/// A catalog item with its translation side-cache.
///
/// `translations` is never authoritative: every entry reflects the current
/// `title`/`description`, and any write to either field empties the map in
/// the same store operation. `content_version` advances on each such write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub group_key: GroupKey,
    pub item_key: ItemKey,
    pub title: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub content_version: u64,
    #[serde(default)]
    pub translations: BTreeMap<LanguageCode, TranslatedView>,
}

impl Item {
    /// Creates a new item with no attributes and an empty cache.
    #[must_use]
    pub fn new(id: ItemId, owner: impl Into<String>) -> Self {
        Self {
            group_key: id.group_key,
            item_key: id.item_key,
            title: None,
            description: None,
            rating: None,
            owner: owner.into(),
            created_at: Utc::now(),
            content_version: 0,
            translations: BTreeMap::new(),
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the rating.
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Returns the composite identity.
    #[must_use]
    pub fn id(&self) -> ItemId {
        ItemId::new(self.group_key.clone(), self.item_key.clone())
    }

    /// Returns the cached view for a language, if any.
    #[must_use]
    pub fn cached_translation(&self, language: &LanguageCode) -> Option<&TranslatedView> {
        self.translations.get(language)
    }

    /// Returns the cached language codes in sorted order.
    #[must_use]
    pub fn cached_languages(&self) -> Vec<LanguageCode> {
        self.translations.keys().cloned().collect()
    }

    /// Whether the item is owned by the given requester.
    #[must_use]
    pub fn is_owned_by(&self, requester: &str) -> bool {
        self.owner == requester
    }

    /// Evaluates a store write condition against the current state.
    #[must_use]
    pub fn matches(&self, condition: &UpdateCondition) -> bool {
        match condition {
            UpdateCondition::OwnerEquals(owner) => self.is_owned_by(owner),
            UpdateCondition::ContentVersion(version) => self.content_version == *version,
        }
    }

    /// Applies a field-scoped update in place.
    ///
    /// Only assigned fields change. `Clear` empties the cache and bumps the
    /// content version; `Put` replaces a single language slot.
    pub fn apply(&mut self, update: &ItemUpdate) {
        if let Some(title) = &update.title {
            self.title = Some(title.clone());
        }
        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }
        if let Some(rating) = update.rating {
            self.rating = Some(rating);
        }

        match &update.translations {
            Some(TranslationsUpdate::Clear) => {
                self.translations.clear();
                self.content_version += 1;
            }
            Some(TranslationsUpdate::Put(view)) => {
                self.translations.insert(view.language.clone(), view.clone());
            }
            None => {}
        }
    }
}
