//! Typed store updates, conditions and query filters.
//!
//! Services describe writes with these values; only the store adapters turn
//! them into storage-specific statements.

use crate::{Item, TranslatedView};

/// Partial update requested by an item's owner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
}

impl ItemPatch {
    /// Whether the patch assigns nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.rating.is_none()
    }

    /// Whether applying the patch makes cached translations stale.
    #[must_use]
    pub const fn invalidates_translations(&self) -> bool {
        self.title.is_some() || self.description.is_some()
    }
}

/// Instruction for the translation cache carried by a store write.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationsUpdate {
    /// Replace the whole map with an empty one.
    Clear,
    /// Set `translations[view.language] = view`, leaving other slots alone.
    Put(TranslatedView),
}

/// A single field-scoped store write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub translations: Option<TranslationsUpdate>,
}

impl ItemUpdate {
    /// Builds the write for an owner patch, clearing the cache in the same
    /// write when a translatable field changes.
    #[must_use]
    pub fn from_patch(patch: &ItemPatch) -> Self {
        Self {
            title: patch.title.clone(),
            description: patch.description.clone(),
            rating: patch.rating,
            translations: patch
                .invalidates_translations()
                .then_some(TranslationsUpdate::Clear),
        }
    }

    /// Builds the merge write that caches one translated view.
    #[must_use]
    pub fn cache_translation(view: TranslatedView) -> Self {
        Self {
            translations: Some(TranslationsUpdate::Put(view)),
            ..Self::default()
        }
    }

    /// Whether the write assigns nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.rating.is_none()
            && self.translations.is_none()
    }
}

/// Condition a store write is subject to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateCondition {
    /// The stored owner equals the given requester.
    OwnerEquals(String),
    /// The stored content version equals the given version.
    ContentVersion(u64),
}

/// Result of a conditional store write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The write was applied.
    Applied,
    /// The item is missing or the condition did not hold; nothing changed.
    ConditionFailed,
}

impl UpdateOutcome {
    /// Whether the write was applied.
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Filter for listing the items of one group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFilter {
    /// Inclusive lower bound on `rating`.
    pub rating_gte: Option<f64>,
    /// Case-insensitive substring of `title` or `description`.
    pub contains: Option<String>,
}

impl ItemFilter {
    /// Creates a filter; a blank `contains` is treated as absent.
    #[must_use]
    pub fn new(rating_gte: Option<f64>, contains: Option<String>) -> Self {
        Self {
            rating_gte,
            contains: contains
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        }
    }

    /// Evaluates the filter against an item.
    #[must_use]
    pub fn matches(&self, item: &Item) -> bool {
        if let Some(min) = self.rating_gte {
            if !item.rating.is_some_and(|rating| rating >= min) {
                return false;
            }
        }

        if let Some(needle) = &self.contains {
            let needle = needle.to_lowercase();
            let hit = |field: &Option<String>| {
                field
                    .as_deref()
                    .is_some_and(|text| text.to_lowercase().contains(&needle))
            };
            if !hit(&item.title) && !hit(&item.description) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemId;

    #[test]
    fn test_patch_emptiness_and_invalidation() {
        assert!(ItemPatch::default().is_empty());

        let rating_only = ItemPatch {
            rating: Some(2.0),
            ..ItemPatch::default()
        };
        assert!(!rating_only.is_empty());
        assert!(!rating_only.invalidates_translations());
        assert_eq!(ItemUpdate::from_patch(&rating_only).translations, None);

        let title = ItemPatch {
            title: Some("New".to_string()),
            ..ItemPatch::default()
        };
        assert!(title.invalidates_translations());
        assert_eq!(
            ItemUpdate::from_patch(&title).translations,
            Some(TranslationsUpdate::Clear)
        );
    }

    #[test]
    fn test_filter_matches() {
        let item = Item::new(ItemId::parse("group#books", "item#2").unwrap(), "seed")
            .with_title("Serverless Notes")
            .with_description("Patterns for event driven systems")
            .with_rating(5.0);

        assert!(ItemFilter::default().matches(&item));
        assert!(ItemFilter::new(Some(5.0), None).matches(&item));
        assert!(!ItemFilter::new(Some(5.5), None).matches(&item));
        assert!(ItemFilter::new(None, Some("NOTES".to_string())).matches(&item));
        assert!(ItemFilter::new(None, Some("event".to_string())).matches(&item));
        assert!(!ItemFilter::new(Some(4.0), Some("quest".to_string())).matches(&item));
    }

    #[test]
    fn test_filter_without_rating_excludes_unrated_items() {
        let unrated = Item::new(ItemId::parse("g", "i").unwrap(), "seed");
        assert!(!ItemFilter::new(Some(0.0), None).matches(&unrated));
        assert_eq!(ItemFilter::new(None, Some("   ".to_string())).contains, None);
    }
}
