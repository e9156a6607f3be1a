//! MySQL item repository implementation.
//!
//! The translation cache lives in a JSON column. A cache write is a
//! `JSON_SET` on one path, so concurrent writes for different languages do
//! not overwrite each other; a source-field write replaces the column with an
//! empty object in the same `UPDATE`.

use crate::{traits::ItemRepository, DatabasePool};
use async_trait::async_trait;
use catalog_core::{
    CatalogError, CatalogResult, GroupKey, Item, ItemFilter, ItemId, ItemKey, ItemUpdate,
    LanguageCode, TranslatedView, TranslationsUpdate, UpdateCondition, UpdateOutcome,
};
use chrono::{DateTime, Utc};
use sqlx::{types::Json, FromRow, MySql, QueryBuilder};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

const SELECT_COLUMNS: &str = "SELECT group_key, item_key, title, description, rating, owner, \
     created_at, content_version, translations FROM catalog_items";

/// MySQL item repository implementation.
#[derive(Clone)]
pub struct MySqlItemRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlItemRepository {
    /// Creates a new MySQL item repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of an item.
#[derive(Debug, FromRow)]
struct ItemRow {
    group_key: String,
    item_key: String,
    title: Option<String>,
    description: Option<String>,
    rating: Option<f64>,
    owner: String,
    created_at: DateTime<Utc>,
    content_version: u64,
    translations: Json<BTreeMap<LanguageCode, TranslatedView>>,
}

impl TryFrom<ItemRow> for Item {
    type Error = CatalogError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        Ok(Item {
            group_key: GroupKey::parse(row.group_key)?,
            item_key: ItemKey::parse(row.item_key)?,
            title: row.title,
            description: row.description,
            rating: row.rating,
            owner: row.owner,
            created_at: row.created_at,
            content_version: row.content_version,
            translations: row.translations.0,
        })
    }
}

/// Escapes `LIKE` wildcards so user input matches literally.
fn like_pattern(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len() + 2);
    escaped.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// JSON path addressing one language slot. Language codes contain only
/// ASCII letters, digits and `-`, so quoting the member name is sufficient.
fn translation_path(language: &LanguageCode) -> String {
    format!("$.\"{}\"", language)
}

fn build_update<'a>(
    id: &'a ItemId,
    update: &'a ItemUpdate,
    condition: Option<&'a UpdateCondition>,
) -> CatalogResult<QueryBuilder<'a, MySql>> {
    let mut qb = QueryBuilder::<MySql>::new("UPDATE catalog_items SET ");
    let mut set = qb.separated(", ");

    if let Some(title) = &update.title {
        set.push("title = ").push_bind_unseparated(title);
    }
    if let Some(description) = &update.description {
        set.push("description = ").push_bind_unseparated(description);
    }
    if let Some(rating) = update.rating {
        set.push("rating = ").push_bind_unseparated(rating);
    }
    match &update.translations {
        Some(TranslationsUpdate::Clear) => {
            set.push("translations = JSON_OBJECT()");
            set.push("content_version = content_version + 1");
        }
        Some(TranslationsUpdate::Put(view)) => {
            let document = serde_json::to_string(view)?;
            set.push("translations = JSON_SET(translations, ")
                .push_bind_unseparated(translation_path(&view.language))
                .push_unseparated(", CAST(")
                .push_bind_unseparated(document)
                .push_unseparated(" AS JSON))");
        }
        None => {}
    }

    qb.push(" WHERE group_key = ")
        .push_bind(id.group_key.as_str())
        .push(" AND item_key = ")
        .push_bind(id.item_key.as_str());

    match condition {
        Some(UpdateCondition::OwnerEquals(owner)) => {
            qb.push(" AND owner = ").push_bind(owner.as_str());
        }
        Some(UpdateCondition::ContentVersion(version)) => {
            qb.push(" AND content_version = ").push_bind(*version);
        }
        None => {}
    }

    Ok(qb)
}

#[async_trait]
impl ItemRepository for MySqlItemRepository {
    async fn find(&self, id: &ItemId) -> CatalogResult<Option<Item>> {
        debug!("Finding item: {}", id);

        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "{} WHERE group_key = ? AND item_key = ?",
            SELECT_COLUMNS
        ))
        .bind(id.group_key.as_str())
        .bind(id.item_key.as_str())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Item::try_from).transpose()
    }

    async fn find_by_group(&self, group_key: &GroupKey, filter: &ItemFilter) -> CatalogResult<Vec<Item>> {
        debug!(group_key = %group_key, ?filter, "Listing items");

        let mut qb = QueryBuilder::<MySql>::new(SELECT_COLUMNS);
        qb.push(" WHERE group_key = ").push_bind(group_key.as_str());

        if let Some(min) = filter.rating_gte {
            qb.push(" AND rating >= ").push_bind(min);
        }
        if let Some(needle) = &filter.contains {
            let pattern = like_pattern(needle);
            qb.push(" AND (LOWER(COALESCE(title, '')) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(COALESCE(description, '')) LIKE ")
                .push_bind(pattern)
                .push(")");
        }
        qb.push(" ORDER BY item_key");

        let rows = qb
            .build_query_as::<ItemRow>()
            .fetch_all(self.pool.inner())
            .await?;

        rows.into_iter().map(Item::try_from).collect()
    }

    async fn insert(&self, item: Item) -> CatalogResult<Item> {
        let id = item.id();
        debug!("Inserting item: {}", id);

        sqlx::query(
            r#"
            INSERT INTO catalog_items (group_key, item_key, title, description, rating,
                                       owner, created_at, content_version, translations)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(item.group_key.as_str())
        .bind(item.item_key.as_str())
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.rating)
        .bind(&item.owner)
        .bind(item.created_at)
        .bind(item.content_version)
        .bind(Json(&item.translations))
        .execute(self.pool.inner())
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                CatalogError::conflict(format!("Item {} already exists", id))
            }
            _ => CatalogError::from(e),
        })?;

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

        let mut qb = build_update(id, update, condition)?;
        let result = qb.build().execute(self.pool.inner()).await?;

        Ok(if result.rows_affected() > 0 {
            UpdateOutcome::Applied
        } else {
            UpdateOutcome::ConditionFailed
        })
    }

    async fn health_check(&self) -> CatalogResult<()> {
        self.pool.health_check().await
    }
}

impl std::fmt::Debug for MySqlItemRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlItemRepository").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::ItemPatch;

    fn id() -> ItemId {
        ItemId::parse("group#books", "item#1").unwrap()
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Notes"), "%notes%");
        assert_eq!(like_pattern("50%_off\\"), "%50\\%\\_off\\\\%");
    }

    #[test]
    fn test_translation_path() {
        let lang = LanguageCode::parse("pt-BR").unwrap();
        assert_eq!(translation_path(&lang), "$.\"pt-br\"");
    }

    #[test]
    fn test_patch_update_sql_clears_cache_in_same_statement() {
        let id = id();
        let update = ItemUpdate::from_patch(&ItemPatch {
            description: Some("changed".to_string()),
            rating: Some(3.0),
            ..ItemPatch::default()
        });
        let condition = UpdateCondition::OwnerEquals("alice".to_string());
        let qb = build_update(&id, &update, Some(&condition)).unwrap();

        assert_eq!(
            qb.sql(),
            "UPDATE catalog_items SET description = ?, rating = ?, \
             translations = JSON_OBJECT(), content_version = content_version + 1 \
             WHERE group_key = ? AND item_key = ? AND owner = ?"
        );
    }

    #[test]
    fn test_cache_write_sql_touches_one_path_only() {
        let id = id();
        let item = Item::new(id.clone(), "alice").with_title("Intro");
        let view = TranslatedView::passthrough(&item, LanguageCode::parse("fr").unwrap());
        let update = ItemUpdate::cache_translation(view);
        let condition = UpdateCondition::ContentVersion(2);
        let qb = build_update(&id, &update, Some(&condition)).unwrap();

        assert_eq!(
            qb.sql(),
            "UPDATE catalog_items SET translations = JSON_SET(translations, ?, CAST(? AS JSON)) \
             WHERE group_key = ? AND item_key = ? AND content_version = ?"
        );
    }
}
