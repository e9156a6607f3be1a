//! Item-related DTOs.

use catalog_core::validation::rules::{finite, not_blank};
use catalog_core::{Item, ItemFilter, ItemPatch, TranslatedView};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Request to create a new item.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    /// Partition key, e.g. `group#books`.
    #[validate(length(max = 191), custom(function = "not_blank", message = "groupKey is required"))]
    pub group_key: String,

    /// Sort key; generated as `item#<uuid>` when omitted or blank.
    #[validate(length(max = 191))]
    pub item_key: Option<String>,

    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(custom(function = "finite", message = "rating must be a finite number"))]
    pub rating: Option<f64>,
}

/// Partial update of an item. Absent fields are left unchanged.
///
/// A field of the wrong JSON type is ignored rather than rejecting the
/// whole body, so `{"title": 5, "rating": 3}` updates only `rating`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient::string")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient::number")]
    #[validate(custom(function = "finite", message = "rating must be a finite number"))]
    pub rating: Option<f64>,
}

mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    pub fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Value::deserialize(deserializer)?.as_f64())
    }
}

impl From<UpdateItemRequest> for ItemPatch {
    fn from(request: UpdateItemRequest) -> Self {
        Self {
            title: request.title,
            description: request.description,
            rating: request.rating,
        }
    }
}

/// Filters for listing the items of a group.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListItemsQuery {
    /// Minimum rating, inclusive.
    #[validate(custom(function = "finite", message = "ratingGte must be a finite number"))]
    pub rating_gte: Option<f64>,

    /// Case-insensitive substring of title or description.
    pub contains: Option<String>,
}

impl From<ListItemsQuery> for ItemFilter {
    fn from(query: ListItemsQuery) -> Self {
        ItemFilter::new(query.rating_gte, query.contains)
    }
}

/// Item response DTO.
///
/// Exposes which languages are cached, not the cached views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub group_key: String,
    pub item_key: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub rating: Option<f64>,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub cached_languages: Vec<String>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        let cached_languages = item
            .cached_languages()
            .into_iter()
            .map(|language| language.as_str().to_string())
            .collect();

        Self {
            group_key: item.group_key.as_str().to_string(),
            item_key: item.item_key.as_str().to_string(),
            title: item.title,
            description: item.description,
            rating: item.rating,
            owner: item.owner,
            created_at: item.created_at,
            cached_languages,
        }
    }
}

/// Item list response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemListResponse {
    pub items: Vec<ItemResponse>,
    pub count: usize,
}

impl From<Vec<Item>> for ItemListResponse {
    fn from(items: Vec<Item>) -> Self {
        let items: Vec<ItemResponse> = items.into_iter().map(ItemResponse::from).collect();
        Self {
            count: items.len(),
            items,
        }
    }
}

/// Acknowledgement of an applied update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateItemResponse {
    pub ok: bool,
}

impl Default for UpdateItemResponse {
    fn default() -> Self {
        Self { ok: true }
    }
}

/// Translated item response DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedViewResponse {
    pub group_key: String,
    pub item_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    /// Language of `title` and `description`.
    pub language: String,
}

impl From<TranslatedView> for TranslatedViewResponse {
    fn from(view: TranslatedView) -> Self {
        Self {
            group_key: view.group_key.as_str().to_string(),
            item_key: view.item_key.as_str().to_string(),
            title: view.title,
            description: view.description,
            rating: view.rating,
            owner: view.owner,
            created_at: view.created_at,
            language: view.language.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{ItemId, LanguageCode};

    fn create_request(group_key: &str) -> CreateItemRequest {
        CreateItemRequest {
            group_key: group_key.to_string(),
            item_key: None,
            title: Some("Intro".to_string()),
            description: None,
            rating: Some(4.0),
        }
    }

    #[test]
    fn test_create_request_valid() {
        assert!(create_request("group#books").validate().is_ok());
    }

    #[test]
    fn test_create_request_blank_group_key() {
        let errors = create_request("   ").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("group_key"));
    }

    #[test]
    fn test_non_finite_rating_rejected() {
        let request = UpdateItemRequest {
            rating: Some(f64::INFINITY),
            ..UpdateItemRequest::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_request_camel_case() {
        let request: CreateItemRequest = serde_json::from_str(
            r#"{"groupKey":"group#books","itemKey":"item#9","rating":5}"#,
        )
        .unwrap();
        assert_eq!(request.item_key.as_deref(), Some("item#9"));
        assert_eq!(request.rating, Some(5.0));
    }

    #[test]
    fn test_update_request_ignores_wrongly_typed_fields() {
        let request: UpdateItemRequest =
            serde_json::from_str(r#"{"title":5,"description":null,"rating":3}"#).unwrap();
        assert_eq!(request.title, None);
        assert_eq!(request.description, None);
        assert_eq!(request.rating, Some(3.0));

        let request: UpdateItemRequest = serde_json::from_str(r#"{"rating":"high"}"#).unwrap();
        assert!(ItemPatch::from(request).is_empty());
    }

    #[test]
    fn test_long_text_fields_are_accepted() {
        let request = UpdateItemRequest {
            title: Some("t".repeat(2000)),
            description: Some("d".repeat(20_000)),
            ..UpdateItemRequest::default()
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_request_into_patch() {
        let request: UpdateItemRequest = serde_json::from_str(r#"{"rating":3}"#).unwrap();
        let patch = ItemPatch::from(request);
        assert_eq!(patch.rating, Some(3.0));
        assert!(!patch.invalidates_translations());
    }

    #[test]
    fn test_item_response_lists_cached_languages() {
        let mut item = Item::new(ItemId::parse("group#books", "item#1").unwrap(), "seed")
            .with_title("Intro");
        for code in ["fr", "de"] {
            let language = LanguageCode::parse(code).unwrap();
            let view = TranslatedView::passthrough(&item, language.clone());
            item.translations.insert(language, view);
        }

        let response = ItemResponse::from(item);
        assert_eq!(response.cached_languages, vec!["de", "fr"]);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["groupKey"], "group#books");
        assert!(json.get("translations").is_none());
    }

    #[test]
    fn test_list_response_counts() {
        let items = vec![
            Item::new(ItemId::parse("group#books", "item#1").unwrap(), "seed"),
            Item::new(ItemId::parse("group#books", "item#2").unwrap(), "seed"),
        ];
        assert_eq!(ItemListResponse::from(items).count, 2);
    }

    #[test]
    fn test_translated_view_response_omits_absent_fields() {
        let item = Item::new(ItemId::parse("group#books", "item#1").unwrap(), "seed")
            .with_title("Intro");
        let view = TranslatedView::passthrough(&item, LanguageCode::parse("fr").unwrap());

        let json = serde_json::to_value(TranslatedViewResponse::from(view)).unwrap();
        assert_eq!(json["title"], "Intro");
        assert_eq!(json["language"], "fr");
        assert!(json.get("description").is_none());
    }
}
