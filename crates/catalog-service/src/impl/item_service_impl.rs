//! Item service implementation.

use crate::dto::{CreateItemRequest, ItemListResponse, ItemResponse, ListItemsQuery, UpdateItemRequest};
use crate::item_service::ItemService;
use async_trait::async_trait;
use catalog_core::{
    CatalogError, CatalogResult, GroupKey, Item, ItemFilter, ItemId, ItemKey, ItemPatch,
    ItemUpdate, UpdateCondition, UpdateOutcome, ValidateExt, ANONYMOUS_OWNER,
};
use catalog_repository::ItemRepository;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// Concrete item service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = ItemService)]
pub struct ItemServiceComponent {
    #[shaku(inject)]
    item_repository: Arc<dyn ItemRepository>,
}

impl ItemServiceComponent {
    /// Creates an item service without going through a module.
    pub fn new(item_repository: Arc<dyn ItemRepository>) -> Self {
        Self { item_repository }
    }

    async fn find_existing(&self, id: &ItemId) -> CatalogResult<Item> {
        self.item_repository
            .find(id)
            .await?
            .ok_or_else(|| CatalogError::not_found("Item", id))
    }
}

#[async_trait]
impl ItemService for ItemServiceComponent {
    async fn create_item(
        &self,
        request: CreateItemRequest,
        requester: Option<&str>,
    ) -> CatalogResult<ItemResponse> {
        debug!("Creating item in group: {}", request.group_key);

        request.validate_request()?;

        let group_key = GroupKey::parse(request.group_key)?;
        let item_key = match request.item_key.filter(|k| !k.trim().is_empty()) {
            Some(key) => ItemKey::parse(key)?,
            None => ItemKey::generate(),
        };
        let owner = requester
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(ANONYMOUS_OWNER);

        let mut item = Item::new(ItemId::new(group_key, item_key), owner);
        item.title = request.title;
        item.description = request.description;
        item.rating = request.rating;

        let saved = self.item_repository.insert(item).await?;

        info!(item = %saved.id(), owner = %saved.owner, "Item created");
        Ok(ItemResponse::from(saved))
    }

    async fn list_items(&self, group_key: &str, query: ListItemsQuery) -> CatalogResult<ItemListResponse> {
        debug!(group_key, ?query, "Listing items");

        query.validate_request()?;
        let group_key = GroupKey::parse(group_key)?;

        let items = self
            .item_repository
            .find_by_group(&group_key, &ItemFilter::from(query))
            .await?;
        Ok(ItemListResponse::from(items))
    }

    async fn get_item(&self, group_key: &str, item_key: &str) -> CatalogResult<ItemResponse> {
        let id = ItemId::parse(group_key, item_key)?;
        debug!("Getting item: {}", id);

        let item = self.find_existing(&id).await?;
        Ok(ItemResponse::from(item))
    }

    async fn update_item(
        &self,
        group_key: &str,
        item_key: &str,
        requester: &str,
        request: UpdateItemRequest,
    ) -> CatalogResult<()> {
        let id = ItemId::parse(group_key, item_key)?;
        debug!(item = %id, requester, "Updating item");

        let item = self.find_existing(&id).await?;
        if !item.is_owned_by(requester) {
            return Err(CatalogError::forbidden(format!(
                "Requester is not the owner of item {}",
                id
            )));
        }

        request.validate_request()?;
        let patch = ItemPatch::from(request);
        if patch.is_empty() {
            return Err(CatalogError::validation("No updatable fields"));
        }

        let update = ItemUpdate::from_patch(&patch);
        let condition = UpdateCondition::OwnerEquals(requester.to_string());
        let outcome = self
            .item_repository
            .update_fields(&id, &update, Some(&condition))
            .await?;

        if outcome == UpdateOutcome::ConditionFailed {
            // Either the item vanished, ownership changed, or the store
            // reported a write that changed no values.
            let current = self.find_existing(&id).await?;
            if !current.is_owned_by(requester) {
                return Err(CatalogError::forbidden(format!(
                    "Requester is not the owner of item {}",
                    id
                )));
            }
        }

        info!(
            item = %id,
            invalidated = patch.invalidates_translations(),
            "Item updated"
        );
        Ok(())
    }
}

impl std::fmt::Debug for ItemServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemServiceComponent").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use catalog_core::{LanguageCode, TranslatedView};
    use catalog_repository::InMemoryItemRepository;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn seeded() -> Arc<InMemoryItemRepository> {
        let item = Item::new(ItemId::parse("group#books", "item#1").unwrap(), "alice")
            .with_title("Intro")
            .with_description("A long text")
            .with_rating(4.0);
        Arc::new(InMemoryItemRepository::with_items([item]))
    }

    fn service(repo: Arc<InMemoryItemRepository>) -> ItemServiceComponent {
        ItemServiceComponent::new(repo)
    }

    fn create_request(item_key: Option<&str>) -> CreateItemRequest {
        CreateItemRequest {
            group_key: "group#books".to_string(),
            item_key: item_key.map(str::to_string),
            title: Some("Serverless Notes".to_string()),
            description: None,
            rating: Some(5.0),
        }
    }

    #[tokio::test]
    async fn test_create_item_defaults() {
        let repo = Arc::new(InMemoryItemRepository::new());
        let response = service(repo.clone())
            .create_item(create_request(None), None)
            .await
            .unwrap();

        assert!(response.item_key.starts_with("item#"));
        assert_eq!(response.owner, ANONYMOUS_OWNER);
        assert!(response.cached_languages.is_empty());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_create_item_owned_by_requester() {
        let response = service(Arc::new(InMemoryItemRepository::new()))
            .create_item(create_request(Some("item#7")), Some("bob"))
            .await
            .unwrap();
        assert_eq!(response.item_key, "item#7");
        assert_eq!(response.owner, "bob");
    }

    #[tokio::test]
    async fn test_create_duplicate_conflicts() {
        let err = service(seeded())
            .create_item(create_request(Some("item#1")), Some("bob"))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_group() {
        let request = CreateItemRequest {
            group_key: " ".to_string(),
            ..create_request(None)
        };
        let err = service(seeded()).create_item(request, None).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_list_items_with_filter() {
        let service = service(seeded());
        service
            .create_item(create_request(Some("item#2")), Some("bob"))
            .await
            .unwrap();

        let all = service
            .list_items("group#books", ListItemsQuery::default())
            .await
            .unwrap();
        assert_eq!(all.count, 2);

        let top = service
            .list_items(
                "group#books",
                ListItemsQuery {
                    rating_gte: Some(5.0),
                    contains: Some("notes".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(top.count, 1);
        assert_eq!(top.items[0].item_key, "item#2");

        let other = service
            .list_items("group#games", ListItemsQuery::default())
            .await
            .unwrap();
        assert_eq!(other.count, 0);
    }

    #[tokio::test]
    async fn test_get_item_not_found() {
        let err = service(seeded())
            .get_item("group#books", "item#404")
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_update_checks_in_order() {
        let service = service(seeded());
        let empty = UpdateItemRequest::default();

        let missing = service
            .update_item("group#books", "item#404", "alice", empty.clone())
            .await
            .unwrap_err();
        assert_eq!(missing.status_code(), 404);

        let foreign = service
            .update_item("group#books", "item#1", "mallory", empty.clone())
            .await
            .unwrap_err();
        assert_eq!(foreign.status_code(), 403);

        let no_fields = service
            .update_item("group#books", "item#1", "alice", empty)
            .await
            .unwrap_err();
        assert_eq!(no_fields.status_code(), 400);
        assert!(no_fields.to_string().contains("No updatable fields"));
    }

    #[tokio::test]
    async fn test_non_owner_update_changes_nothing() {
        let repo = seeded();
        let request = UpdateItemRequest {
            title: Some("Hijacked".to_string()),
            ..UpdateItemRequest::default()
        };
        let err = service(repo.clone())
            .update_item("group#books", "item#1", "mallory", request)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Forbidden(_)));

        let item = repo
            .find(&ItemId::parse("group#books", "item#1").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(item.title.as_deref(), Some("Intro"));
    }

    #[tokio::test]
    async fn test_rating_update_keeps_cache_and_description_update_clears_it() {
        let repo = seeded();
        let id = ItemId::parse("group#books", "item#1").unwrap();
        let current = repo.find(&id).await.unwrap().unwrap();
        let view = TranslatedView::passthrough(&current, LanguageCode::parse("fr").unwrap());
        repo.update_fields(&id, &ItemUpdate::cache_translation(view), None)
            .await
            .unwrap();

        let service = service(repo.clone());
        service
            .update_item(
                "group#books",
                "item#1",
                "alice",
                UpdateItemRequest {
                    rating: Some(2.0),
                    ..UpdateItemRequest::default()
                },
            )
            .await
            .unwrap();
        let after_rating = repo.find(&id).await.unwrap().unwrap();
        assert_eq!(after_rating.rating, Some(2.0));
        assert_eq!(after_rating.cached_languages().len(), 1);

        service
            .update_item(
                "group#books",
                "item#1",
                "alice",
                UpdateItemRequest {
                    description: Some("changed".to_string()),
                    ..UpdateItemRequest::default()
                },
            )
            .await
            .unwrap();
        let after_description = repo.find(&id).await.unwrap().unwrap();
        assert_eq!(after_description.description.as_deref(), Some("changed"));
        assert!(after_description.translations.is_empty());
    }

    /// Store whose conditional writes always report a failed condition,
    /// mimicking a write that changed no row values.
    struct NoopWriteRepository {
        items: Mutex<HashMap<ItemId, Item>>,
    }

    #[async_trait]
    impl ItemRepository for NoopWriteRepository {
        async fn find(&self, id: &ItemId) -> CatalogResult<Option<Item>> {
            Ok(self.items.lock().unwrap().get(id).cloned())
        }

        async fn find_by_group(&self, _: &GroupKey, _: &ItemFilter) -> CatalogResult<Vec<Item>> {
            Ok(Vec::new())
        }

        async fn insert(&self, item: Item) -> CatalogResult<Item> {
            self.items.lock().unwrap().insert(item.id(), item.clone());
            Ok(item)
        }

        async fn update_fields(
            &self,
            _: &ItemId,
            _: &ItemUpdate,
            _: Option<&UpdateCondition>,
        ) -> CatalogResult<UpdateOutcome> {
            Ok(UpdateOutcome::ConditionFailed)
        }

        async fn health_check(&self) -> CatalogResult<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_unchanged_write_by_owner_is_success() {
        let item = Item::new(ItemId::parse("group#books", "item#1").unwrap(), "alice").with_rating(4.0);
        let repo = NoopWriteRepository {
            items: Mutex::new(HashMap::from([(item.id(), item)])),
        };
        let service = ItemServiceComponent::new(Arc::new(repo));

        let request = UpdateItemRequest {
            rating: Some(4.0),
            ..UpdateItemRequest::default()
        };
        service
            .update_item("group#books", "item#1", "alice", request)
            .await
            .unwrap();
    }
}
