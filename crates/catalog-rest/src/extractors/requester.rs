//! Requester identity extractors.
//!
//! The identity is an opaque string supplied by the caller in the
//! `x-requester-id` header. It is not verified here.

use crate::responses::AppError;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use catalog_core::CatalogError;
use std::convert::Infallible;

/// Header carrying the requester identity.
pub const REQUESTER_HEADER: &str = "x-requester-id";

fn requester_from(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(REQUESTER_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// Extractor for a required requester identity.
///
/// Rejects with 401 when the header is missing or blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester(pub String);

impl std::ops::Deref for Requester {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Requester
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        requester_from(parts).map(Requester).ok_or_else(|| {
            AppError(CatalogError::unauthorized(format!(
                "Missing {} header",
                REQUESTER_HEADER
            )))
        })
    }
}

/// Optional requester extractor.
///
/// Returns `None` when no identity is supplied, instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionalRequester(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalRequester
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalRequester(requester_from(parts)))
    }
}
