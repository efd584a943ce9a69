//! Pagination extractor
//!
//! Extracts 1-based page-number pagination from query strings:
//! `?page=2&limit=10&sort=upvotes`.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use forum_core::{PageRequest, PostSort};
use serde::Deserialize;

use crate::response::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub sort: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: u32,
    pub limit: Option<u32>,
    pub sort: PostSort,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: None,
            sort: PostSort::Recent,
        }
    }
}

impl Pagination {
    /// Page request using the caller's `limit` or `default_size`, clamped
    pub fn page_request(&self, default_size: u32) -> Result<PageRequest, ApiError> {
        let size = self
            .limit
            .unwrap_or(default_size)
            .clamp(1, PageRequest::MAX_PAGE_SIZE);
        Ok(PageRequest::new(self.page, size)?)
    }

    /// Page request with a fixed size; any `limit` is ignored
    pub fn fixed_page_request(&self, size: u32) -> Result<PageRequest, ApiError> {
        Ok(PageRequest::new(self.page, size)?)
    }
}

impl From<PaginationParams> for Pagination {
    fn from(params: PaginationParams) -> Self {
        Self {
            page: params.page.unwrap_or(1),
            limit: params.limit,
            sort: PostSort::from_key(params.sort.as_deref()),
        }
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

        Ok(Pagination::from(params))
    }
}
