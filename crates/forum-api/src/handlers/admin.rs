//! Admin handlers

use axum::{extract::State, Json};
use forum_core::PageRequest;
use forum_service::dto::UserListResponse;
use forum_service::AdminService;

use crate::extractors::{Pagination, RequireAdmin};
use crate::response::ApiResult;
use crate::state::AppState;

/// List all accounts
///
/// GET /api/admin/users?page&limit
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(session): RequireAdmin,
    pagination: Pagination,
) -> ApiResult<Json<UserListResponse>> {
    let page = pagination.page_request(PageRequest::COMMENTS_PAGE_SIZE)?;
    let service = AdminService::new(state.service_context());
    Ok(Json(service.list_users(&session, page).await?))
}
