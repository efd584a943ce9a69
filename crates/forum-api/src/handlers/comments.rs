//! Comment handlers

use axum::{extract::State, Json};
use forum_core::{PageRequest, VoteDirection};
use forum_service::dto::{
    CommentListResponse, CommentResponse, CreateCommentRequest, MessageResponse, VoteResponse,
};
use forum_service::CommentService;

use crate::extractors::{AuthUser, IdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /api/comments/post/:postId?page&limit
pub async fn list_comments(
    State(state): State<AppState>,
    IdPath(post_id): IdPath,
    pagination: Pagination,
) -> ApiResult<Json<CommentListResponse>> {
    let page = pagination.page_request(PageRequest::COMMENTS_PAGE_SIZE)?;
    let service = CommentService::new(state.service_context());
    Ok(Json(service.list_comments(post_id, page).await?))
}

/// POST /api/comments
pub async fn create_comment(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let comment = service.create_comment(&session, request).await?;
    Ok(Created(Json(comment)))
}

/// DELETE /api/comments/:id
pub async fn delete_comment(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    IdPath(comment_id): IdPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = CommentService::new(state.service_context());
    Ok(Json(service.delete_comment(&session, comment_id).await?))
}

/// POST /api/comments/:id/upvote
pub async fn upvote_comment(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    IdPath(comment_id): IdPath,
) -> ApiResult<Json<VoteResponse<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    Ok(Json(service.vote(&session, comment_id, VoteDirection::Up).await?))
}

/// POST /api/comments/:id/downvote
pub async fn downvote_comment(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    IdPath(comment_id): IdPath,
) -> ApiResult<Json<VoteResponse<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    Ok(Json(service.vote(&session, comment_id, VoteDirection::Down).await?))
}
