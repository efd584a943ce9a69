//! User handlers
//!
//! Public profiles, and the caller's own profile and password.

use axum::{extract::State, Json};
use forum_service::dto::{
    AuthResponse, ChangePasswordRequest, MessageResponse, PublicUserResponse,
    UpdateProfileRequest,
};
use forum_service::UserService;

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get a user's public profile
///
/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    IdPath(user_id): IdPath,
) -> ApiResult<Json<PublicUserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.get_user(user_id).await?))
}

/// Change the caller's username
///
/// PUT /api/users/profile
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.update_profile(&session, request).await?))
}

/// Change the caller's password
///
/// PUT /api/users/password
pub async fn change_password(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    ValidatedJson(request): ValidatedJson<ChangePasswordRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.change_password(&session, request).await?))
}
