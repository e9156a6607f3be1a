//! JSON and query extractors with enveloped rejections.
//!
//! Axum's own extractors reject with plain-text bodies. These wrappers turn
//! malformed input into a 400 `BAD_REQUEST` in the standard API envelope.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use catalog_core::CatalogError;
use serde::de::DeserializeOwned;

/// JSON body extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError(CatalogError::validation(format!("Invalid JSON: {}", rejection.body_text()))))?;

        Ok(ApiJson(value))
    }
}

/// Query string extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError(CatalogError::validation(format!("Invalid query: {}", rejection.body_text()))))?;

        Ok(ApiQuery(value))
    }
}
