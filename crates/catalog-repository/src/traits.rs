//! Repository trait definitions.

use async_trait::async_trait;
use catalog_core::{
    CatalogResult, GroupKey, Interface, Item, ItemFilter, ItemId, ItemUpdate, UpdateCondition,
    UpdateOutcome,
};

/// Item store.
///
/// Every mutation is a field-scoped partial update applied atomically per
/// call; there is no whole-item overwrite.
#[async_trait]
pub trait ItemRepository: Interface + Send + Sync {
    /// Finds an item by identity.
    async fn find(&self, id: &ItemId) -> CatalogResult<Option<Item>>;

    /// Lists the items of one group matching the filter, ordered by item key.
    async fn find_by_group(&self, group_key: &GroupKey, filter: &ItemFilter) -> CatalogResult<Vec<Item>>;

    /// Inserts a new item. Fails with `Conflict` if the identity exists.
    async fn insert(&self, item: Item) -> CatalogResult<Item>;

    /// Applies a field-scoped update, optionally conditioned.
    ///
    /// A missing item is reported as `ConditionFailed` and never created.
    /// An update that assigns nothing is rejected as a validation error.
    async fn update_fields(
        &self,
        id: &ItemId,
        update: &ItemUpdate,
        condition: Option<&UpdateCondition>,
    ) -> CatalogResult<UpdateOutcome>;

    /// Checks that the store is reachable.
    async fn health_check(&self) -> CatalogResult<()>;
}
