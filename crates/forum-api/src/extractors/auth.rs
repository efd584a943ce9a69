//! Authentication extractors
//!
//! Verify the bearer token from the Authorization header and hand the
//! verified session to handlers. No storage lookup happens here.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use forum_common::auth::Session;
use forum_common::AppError;
use forum_core::DomainError;

use crate::response::ApiError;
use crate::state::AppState;

/// Authenticated caller extracted from a session token
#[derive(Debug, Clone)]
pub struct AuthUser(pub Session);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::App(AppError::MissingAuth))?;

        let app_state = AppState::from_ref(state);

        let session = app_state
            .jwt_service()
            .verify_session(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected session token");
                ApiError::App(e)
            })?;

        Ok(AuthUser(session))
    }
}

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(session): RequireAdmin) -> ApiResult<Json<()>> {
///     // session is guaranteed to belong to an admin here
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAdmin(pub Session);

#[async_trait]
impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(session) = AuthUser::from_request_parts(parts, state).await?;
        if !session.is_admin() {
            tracing::warn!(user_id = %session.user_id, "Admin route refused");
            return Err(ApiError::Domain(DomainError::AdminRequired));
        }
        Ok(RequireAdmin(session))
    }
}
