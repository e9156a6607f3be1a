//! Integration tests for MySqlItemRepository.
//!
//! These tests run against a real MySQL database using testcontainers and
//! need Docker: `cargo test -p catalog-repository -- --ignored`.

mod common;

use catalog_core::{
    GroupKey, Item, ItemFilter, ItemId, ItemPatch, ItemUpdate, LanguageCode, TranslatedView,
    UpdateCondition, UpdateOutcome,
};
use catalog_repository::{ItemRepository, MySqlItemRepository};
use common::TestDatabase;

fn book(item: &str, title: &str, rating: f64) -> Item {
    Item::new(ItemId::parse("group#books", item).unwrap(), "alice")
        .with_title(title)
        .with_description("A long text")
        .with_rating(rating)
}

fn lang(code: &str) -> LanguageCode {
    LanguageCode::parse(code).unwrap()
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_insert_and_find_round_trip() {
    let db = TestDatabase::new().await;
    let repo = MySqlItemRepository::new(db.pool());

    let item = book("item#1", "Intro", 4.0);
    repo.insert(item.clone()).await.expect("Failed to insert item");

    let found = repo
        .find(&item.id())
        .await
        .expect("Query failed")
        .expect("Item not found");

    assert_eq!(found.title.as_deref(), Some("Intro"));
    assert_eq!(found.rating, Some(4.0));
    assert_eq!(found.owner, "alice");
    assert_eq!(found.content_version, 0);
    assert!(found.translations.is_empty());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_insert_conflicts() {
    let db = TestDatabase::new().await;
    let repo = MySqlItemRepository::new(db.pool());

    repo.insert(book("item#1", "Intro", 4.0)).await.unwrap();
    let err = repo.insert(book("item#1", "Again", 1.0)).await.unwrap_err();
    assert_eq!(err.status_code(), 409);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_by_group_with_filters() {
    let db = TestDatabase::new().await;
    let repo = MySqlItemRepository::new(db.pool());

    repo.insert(book("item#2", "Serverless Notes", 5.0)).await.unwrap();
    repo.insert(book("item#1", "Intro to Systems", 4.0)).await.unwrap();
    repo.insert(Item::new(ItemId::parse("group#games", "item#1").unwrap(), "seed"))
        .await
        .unwrap();

    let books = GroupKey::parse("group#books").unwrap();
    let all = repo.find_by_group(&books, &ItemFilter::default()).await.unwrap();
    let keys: Vec<_> = all.iter().map(|i| i.item_key.as_str().to_string()).collect();
    assert_eq!(keys, vec!["item#1", "item#2"]);

    let top = repo
        .find_by_group(&books, &ItemFilter::new(Some(4.5), None))
        .await
        .unwrap();
    assert_eq!(top.len(), 1);

    let notes = repo
        .find_by_group(&books, &ItemFilter::new(None, Some("NOTES".to_string())))
        .await
        .unwrap();
    assert_eq!(notes[0].item_key.as_str(), "item#2");
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_cache_merge_and_clear() {
    let db = TestDatabase::new().await;
    let repo = MySqlItemRepository::new(db.pool());

    let item = book("item#1", "Intro", 4.0);
    let id = item.id();
    repo.insert(item.clone()).await.unwrap();

    for code in ["fr", "de"] {
        let view = TranslatedView::passthrough(&item, lang(code));
        let outcome = repo
            .update_fields(&id, &ItemUpdate::cache_translation(view), None)
            .await
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::Applied);
    }

    let cached = repo.find(&id).await.unwrap().unwrap();
    assert_eq!(cached.cached_languages(), vec![lang("de"), lang("fr")]);
    assert_eq!(cached.translations[&lang("fr")].title.as_deref(), Some("Intro"));

    let rating_only = ItemUpdate::from_patch(&ItemPatch {
        rating: Some(2.0),
        ..ItemPatch::default()
    });
    repo.update_fields(&id, &rating_only, None).await.unwrap();
    assert_eq!(repo.find(&id).await.unwrap().unwrap().translations.len(), 2);

    let description = ItemUpdate::from_patch(&ItemPatch {
        description: Some("changed".to_string()),
        ..ItemPatch::default()
    });
    repo.update_fields(&id, &description, Some(&UpdateCondition::OwnerEquals("alice".into())))
        .await
        .unwrap();

    let cleared = repo.find(&id).await.unwrap().unwrap();
    assert!(cleared.translations.is_empty());
    assert_eq!(cleared.description.as_deref(), Some("changed"));
    assert_eq!(cleared.content_version, 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_conditions_and_missing_items() {
    let db = TestDatabase::new().await;
    let repo = MySqlItemRepository::new(db.pool());

    let item = book("item#1", "Intro", 4.0);
    let id = item.id();
    repo.insert(item.clone()).await.unwrap();

    let patch = ItemUpdate::from_patch(&ItemPatch {
        title: Some("Hijacked".to_string()),
        ..ItemPatch::default()
    });
    let denied = repo
        .update_fields(&id, &patch, Some(&UpdateCondition::OwnerEquals("mallory".into())))
        .await
        .unwrap();
    assert_eq!(denied, UpdateOutcome::ConditionFailed);

    let stale = TranslatedView::passthrough(&item, lang("fr"));
    let dropped = repo
        .update_fields(
            &id,
            &ItemUpdate::cache_translation(stale),
            Some(&UpdateCondition::ContentVersion(9)),
        )
        .await
        .unwrap();
    assert_eq!(dropped, UpdateOutcome::ConditionFailed);

    let missing = ItemId::parse("group#books", "item#404").unwrap();
    let outcome = repo.update_fields(&missing, &patch, None).await.unwrap();
    assert_eq!(outcome, UpdateOutcome::ConditionFailed);
    assert!(repo.find(&missing).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_health_check() {
    let db = TestDatabase::new().await;
    let repo = MySqlItemRepository::new(db.pool());
    repo.health_check().await.expect("store should be reachable");
}
