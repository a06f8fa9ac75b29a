//! Pagination extractor
//!
//! Reads `limit` and `offset` from the query string into a bounded [`Page`].

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use roster_service::dto::Page;
use serde::Deserialize;

use crate::response::ApiError;

/// Raw pagination query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

/// Clamped pagination parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct Pagination(pub Page);

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        Self(Page::new(params.limit, params.offset))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        Ok(params.into())
    }
}
