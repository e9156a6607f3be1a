//! Item service trait definition.

use crate::dto::{CreateItemRequest, ItemListResponse, ItemResponse, ListItemsQuery, UpdateItemRequest};
use async_trait::async_trait;
use catalog_core::{CatalogResult, Interface};

/// Item service trait.
#[async_trait]
pub trait ItemService: Interface + Send + Sync {
    /// Creates a new item owned by the requester, or `anonymous`.
    async fn create_item(
        &self,
        request: CreateItemRequest,
        requester: Option<&str>,
    ) -> CatalogResult<ItemResponse>;

    /// Lists the items of a group.
    async fn list_items(&self, group_key: &str, query: ListItemsQuery) -> CatalogResult<ItemListResponse>;

    /// Gets an item by its keys.
    async fn get_item(&self, group_key: &str, item_key: &str) -> CatalogResult<ItemResponse>;

    /// Applies a partial update on behalf of the item's owner.
    ///
    /// Changing `title` or `description` drops every cached translation in
    /// the same write.
    async fn update_item(
        &self,
        group_key: &str,
        item_key: &str,
        requester: &str,
        request: UpdateItemRequest,
    ) -> CatalogResult<()>;
}
