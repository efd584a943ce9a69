//! Path parameter extractor
//!
//! Type-safe extraction of a positive numeric id from a single-segment path
//! parameter such as `/posts/:id`.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use forum_core::Id;

use crate::response::ApiError;

#[derive(Debug, Clone, Copy)]
pub struct IdPath(pub Id);

#[async_trait]
impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        let id = Id::parse(&raw).map_err(|_| ApiError::invalid_path("Invalid id format"))?;
        Ok(IdPath(id))
    }
}
