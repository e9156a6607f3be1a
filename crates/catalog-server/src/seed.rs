//! Demo data seeding.

use catalog_core::{CatalogError, CatalogResult, Item, ItemId};
use catalog_repository::ItemRepository;
use tracing::{debug, info};

/// Owner recorded on seeded items.
pub const SEED_OWNER: &str = "seed";

const DEMO_ITEMS: [(&str, &str, &str, &str, f64); 3] = [
    (
        "group#books",
        "item#1",
        "Intro to Systems",
        "a long text about distributed systems and patterns in the real world.",
        4.0,
    ),
    (
        "group#books",
        "item#2",
        "Serverless Notes",
        "notes about aws lambda, api gateway, and dynamodb for students.",
        5.0,
    ),
    (
        "group#games",
        "item#1",
        "Cloud Quest",
        "A quest game that talks about cloud services and how to use them.",
        3.0,
    ),
];

/// Returns the demo items.
pub fn demo_items() -> CatalogResult<Vec<Item>> {
    DEMO_ITEMS
        .iter()
        .map(|(group, item, title, description, rating)| {
            Ok(Item::new(ItemId::parse(group, item)?, SEED_OWNER)
                .with_title(*title)
                .with_description(*description)
                .with_rating(*rating))
        })
        .collect()
}

/// Inserts the demo items, skipping identities that already exist.
///
/// Returns the number of items inserted.
pub async fn seed_demo_data(repository: &dyn ItemRepository) -> CatalogResult<usize> {
    let mut inserted = 0;

    for item in demo_items()? {
        let id = item.id();
        match repository.insert(item).await {
            Ok(_) => inserted += 1,
            Err(CatalogError::Conflict(_)) => debug!(id = %id, "Demo item already present"),
            Err(e) => return Err(e),
        }
    }

    info!(inserted, "Demo data seeded");
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::ItemFilter;
    use catalog_repository::InMemoryItemRepository;

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let repository = InMemoryItemRepository::new();

        assert_eq!(seed_demo_data(&repository).await.unwrap(), 3);
        assert_eq!(seed_demo_data(&repository).await.unwrap(), 0);
        assert_eq!(repository.len(), 3);
    }

    #[tokio::test]
    async fn test_seeded_items_are_owned_by_seed() {
        let repository = InMemoryItemRepository::new();
        seed_demo_data(&repository).await.unwrap();

        let books = repository
            .find_by_group(&catalog_core::GroupKey::parse("group#books").unwrap(), &ItemFilter::default())
            .await
            .unwrap();
        assert_eq!(books.len(), 2);
        assert!(books.iter().all(|item| item.owner == SEED_OWNER));
        assert!(books.iter().all(|item| item.translations.is_empty()));
    }
}
