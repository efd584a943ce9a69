//! Post handlers

use axum::{extract::State, Json};
use forum_core::{PageRequest, VoteDirection};
use forum_service::dto::{
    CreatePostRequest, MessageResponse, PostDetailResponse, PostListResponse, PostResponse,
    UpdatePostRequest, VoteResponse,
};
use forum_service::PostService;

use crate::extractors::{AuthUser, IdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /api/posts?page&sort
pub async fn list_posts(
    State(state): State<AppState>,
    pagination: Pagination,
) -> ApiResult<Json<PostListResponse>> {
    let page = pagination.fixed_page_request(PageRequest::POSTS_PAGE_SIZE)?;
    let service = PostService::new(state.service_context());
    Ok(Json(service.list_posts(page, pagination.sort).await?))
}

/// GET /api/posts/:id
pub async fn get_post(
    State(state): State<AppState>,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<PostDetailResponse>> {
    let service = PostService::new(state.service_context());
    Ok(Json(service.get_post(post_id).await?))
}

/// POST /api/posts
pub async fn create_post(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let post = service.create_post(&session, request).await?;
    Ok(Created(Json(post)))
}

/// PUT /api/posts/:id
pub async fn update_post(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    IdPath(post_id): IdPath,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    Ok(Json(service.update_post(&session, post_id, request).await?))
}

/// DELETE /api/posts/:id
pub async fn delete_post(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = PostService::new(state.service_context());
    Ok(Json(service.delete_post(&session, post_id).await?))
}

/// POST /api/posts/:id/upvote
pub async fn upvote_post(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<VoteResponse<PostResponse>>> {
    let service = PostService::new(state.service_context());
    Ok(Json(service.vote(&session, post_id, VoteDirection::Up).await?))
}

/// POST /api/posts/:id/downvote
pub async fn downvote_post(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    IdPath(post_id): IdPath,
) -> ApiResult<Json<VoteResponse<PostResponse>>> {
    let service = PostService::new(state.service_context());
    Ok(Json(service.vote(&session, post_id, VoteDirection::Down).await?))
}
