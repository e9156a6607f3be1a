//! OpenAPI documentation configuration.

use crate::controllers::health_controller::{ComponentHealth, HealthResponse, ReadinessResponse};
use catalog_core::{ErrorResponse, FieldError};
use catalog_service::{
    CreateItemRequest, ItemListResponse, ItemResponse, TranslatedViewResponse, UpdateItemRequest,
    UpdateItemResponse,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the catalog API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Polyglot Catalog API",
        version = "1.0.0",
        description = "Multi-tenant item catalog with cached per-language views",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        crate::controllers::item_controller::create_item,
        crate::controllers::item_controller::list_items,
        crate::controllers::item_controller::get_item,
        crate::controllers::item_controller::update_item,
        crate::controllers::translation_controller::get_translation,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            ErrorResponse,
            FieldError,
            CreateItemRequest,
            UpdateItemRequest,
            ItemResponse,
            ItemListResponse,
            UpdateItemResponse,
            TranslatedViewResponse,
            HealthResponse,
            ReadinessResponse,
            ComponentHealth,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "items", description = "Item catalog endpoints"),
        (name = "translations", description = "Translated item views"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Registers the requester identity header as a security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "requester_id",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                    crate::extractors::REQUESTER_HEADER,
                    "Opaque identity of the calling tenant",
                ))),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_item_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();
        assert!(paths.contains(&"/items".to_string()));
        assert!(paths.contains(&"/items/{group_key}/{item_key}/translation".to_string()));
        assert!(doc
            .components
            .as_ref()
            .is_some_and(|c| c.security_schemes.contains_key("requester_id")));
    }
}
