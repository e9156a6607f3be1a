//! In-memory item store.

use crate::traits::ItemRepository;
use async_trait::async_trait;
use catalog_core::{
    CatalogError, CatalogResult, GroupKey, Item, ItemFilter, ItemId, ItemUpdate, UpdateCondition,
    UpdateOutcome,
};
use parking_lot::RwLock;
use shaku::Component;
use std::collections::BTreeMap;
use tracing::debug;

/// Process-local item store.
///
/// Each call takes the lock once, so a conditional update checks and writes
/// without interleaving with other store calls.
#[derive(Component, Default)]
#[shaku(interface = ItemRepository)]
pub struct InMemoryItemRepository {
    #[shaku(default)]
    items: RwLock<BTreeMap<ItemId, Item>>,
}

impl InMemoryItemRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with items.
    #[must_use]
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let map = items.into_iter().map(|item| (item.id(), item)).collect();
        Self {
            items: RwLock::new(map),
        }
    }

    /// Number of stored items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn find(&self, id: &ItemId) -> CatalogResult<Option<Item>> {
        debug!("Finding item: {}", id);
        Ok(self.items.read().get(id).cloned())
    }

    async fn find_by_group(&self, group_key: &GroupKey, filter: &ItemFilter) -> CatalogResult<Vec<Item>> {
        debug!(group_key = %group_key, ?filter, "Listing items");
        Ok(self
            .items
            .read()
            .values()
            .filter(|item| &item.group_key == group_key && filter.matches(item))
            .cloned()
            .collect())
    }

    async fn insert(&self, item: Item) -> CatalogResult<Item> {
        let id = item.id();
        debug!("Inserting item: {}", id);

        let mut items = self.items.write();
        if items.contains_key(&id) {
            return Err(CatalogError::conflict(format!("Item {} already exists", id)));
        }
        items.insert(id, item.clone());
        Ok(item)
    }

    async fn update_fields(
        &self,
        id: &ItemId,
        update: &ItemUpdate,
        condition: Option<&UpdateCondition>,
    ) -> CatalogResult<UpdateOutcome> {
        debug!(item = %id, ?condition, "Updating item fields");

        if update.is_empty() {
            return Err(CatalogError::validation("No updatable fields"));
        }

        let mut items = self.items.write();
        let Some(item) = items.get_mut(id) else {
            return Ok(UpdateOutcome::ConditionFailed);
        };

        if condition.is_some_and(|c| !item.matches(c)) {
            return Ok(UpdateOutcome::ConditionFailed);
        }

        item.apply(update);
        Ok(UpdateOutcome::Applied)
    }

    async fn health_check(&self) -> CatalogResult<()> {
        Ok(())
    }
}

impl std::fmt::Debug for InMemoryItemRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryItemRepository")
            .field("items", &self.len())
            .finish()
    }
}
