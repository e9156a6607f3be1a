//! Item catalog controller.

use crate::{
    extractors::{ApiJson, ApiQuery, OptionalRequester, Requester},
    responses::{created, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use catalog_service::{
    CreateItemRequest, ItemListResponse, ItemResponse, ListItemsQuery, UpdateItemRequest,
    UpdateItemResponse,
};
use tracing::debug;

/// Creates the item router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_item))
        .route("/:group_key", get(list_items))
        .route("/:group_key/:item_key", get(get_item).put(update_item))
        .route(
            "/:group_key/:item_key/translation",
            get(super::translation_controller::get_translation),
        )
}

/// Create an item owned by the requester.
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = CreateItemRequest,
    params(
        ("x-requester-id" = Option<String>, Header, description = "Owner of the new item; `anonymous` when absent")
    ),
    responses(
        (status = 201, description = "Item created", body = ItemResponse),
        (status = 400, description = "Invalid request", body = catalog_core::ErrorResponse),
        (status = 409, description = "Item already exists", body = catalog_core::ErrorResponse)
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    OptionalRequester(requester): OptionalRequester,
    ApiJson(request): ApiJson<CreateItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ItemResponse>>), AppError> {
    debug!(group_key = %request.group_key, "Create item request");

    let response = state
        .item_service
        .create_item(request, requester.as_deref())
        .await?;
    Ok(created(response))
}

/// List the items of a group.
#[utoipa::path(
    get,
    path = "/items/{group_key}",
    tag = "items",
    params(
        ("group_key" = String, Path, description = "Group key"),
        ListItemsQuery
    ),
    responses(
        (status = 200, description = "Items in the group", body = ItemListResponse),
        (status = 400, description = "Invalid filter", body = catalog_core::ErrorResponse)
    )
)]
pub async fn list_items(
    State(state): State<AppState>,
    Path(group_key): Path<String>,
    ApiQuery(query): ApiQuery<ListItemsQuery>,
) -> ApiResult<ItemListResponse> {
    debug!(group_key = %group_key, "List items request");

    let response = state.item_service.list_items(&group_key, query).await?;
    ok(response)
}

/// Get a single item.
#[utoipa::path(
    get,
    path = "/items/{group_key}/{item_key}",
    tag = "items",
    params(
        ("group_key" = String, Path, description = "Group key"),
        ("item_key" = String, Path, description = "Item key")
    ),
    responses(
        (status = 200, description = "Item found", body = ItemResponse),
        (status = 404, description = "Item not found", body = catalog_core::ErrorResponse)
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path((group_key, item_key)): Path<(String, String)>,
) -> ApiResult<ItemResponse> {
    debug!(group_key = %group_key, item_key = %item_key, "Get item request");

    let response = state.item_service.get_item(&group_key, &item_key).await?;
    ok(response)
}

/// Partially update an item. Only the owner may do this.
#[utoipa::path(
    put,
    path = "/items/{group_key}/{item_key}",
    tag = "items",
    request_body = UpdateItemRequest,
    params(
        ("group_key" = String, Path, description = "Group key"),
        ("item_key" = String, Path, description = "Item key")
    ),
    responses(
        (status = 200, description = "Item updated", body = UpdateItemResponse),
        (status = 400, description = "Invalid or empty patch", body = catalog_core::ErrorResponse),
        (status = 401, description = "Missing requester", body = catalog_core::ErrorResponse),
        (status = 403, description = "Requester is not the owner", body = catalog_core::ErrorResponse),
        (status = 404, description = "Item not found", body = catalog_core::ErrorResponse)
    ),
    security(("requester_id" = []))
)]
pub async fn update_item(
    State(state): State<AppState>,
    requester: Requester,
    Path((group_key, item_key)): Path<(String, String)>,
    ApiJson(request): ApiJson<UpdateItemRequest>,
) -> ApiResult<UpdateItemResponse> {
    debug!(group_key = %group_key, item_key = %item_key, requester = %requester.0, "Update item request");

    state
        .item_service
        .update_item(&group_key, &item_key, &requester, request)
        .await?;
    ok(UpdateItemResponse::default())
}
