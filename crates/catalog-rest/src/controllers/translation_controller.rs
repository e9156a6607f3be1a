//! Translated item view controller.

use crate::{
    extractors::ApiQuery,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::extract::{Path, State};
use catalog_service::TranslatedViewResponse;
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;

/// Query parameters for the translated view.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TranslationQuery {
    /// Target language code. Defaults to the configured language.
    pub language: Option<String>,
}

/// Get an item's text fields in the requested language.
#[utoipa::path(
    get,
    path = "/items/{group_key}/{item_key}/translation",
    tag = "translations",
    params(
        ("group_key" = String, Path, description = "Group key"),
        ("item_key" = String, Path, description = "Item key"),
        TranslationQuery
    ),
    responses(
        (status = 200, description = "Translated view", body = TranslatedViewResponse),
        (status = 400, description = "Invalid identifiers or language", body = catalog_core::ErrorResponse),
        (status = 404, description = "Item not found", body = catalog_core::ErrorResponse)
    )
)]
pub async fn get_translation(
    State(state): State<AppState>,
    Path((group_key, item_key)): Path<(String, String)>,
    ApiQuery(query): ApiQuery<TranslationQuery>,
) -> ApiResult<TranslatedViewResponse> {
    debug!(group_key = %group_key, item_key = %item_key, language = ?query.language, "Translation request");

    let view = state
        .translation_engine
        .get_translated(&group_key, &item_key, query.language.as_deref())
        .await?;
    ok(view.into())
}
