//! Comment service

use forum_common::auth::Session;
use forum_core::entities::{Comment, NewComment, VoteDirection, VoteSubject};
use forum_core::{DomainError, Id, PageRequest};
use tracing::{debug, info, instrument};

use crate::dto::{
    CommentListResponse, CommentResponse, CreateCommentRequest, MessageResponse, VoteResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    /// Create a new CommentService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Comments of a post, most upvoted first, then newest
    #[instrument(skip(self))]
    pub async fn list_comments(
        &self,
        post_id: Id,
        page: PageRequest,
    ) -> ServiceResult<CommentListResponse> {
        self.ensure_post(post_id).await?;
        let comments = self.ctx.comment_repo().list_by_post(post_id, page).await?;
        Ok(CommentListResponse::from(comments))
    }

    #[instrument(skip(self, session, request), fields(user_id = %session.user_id, post_id = %request.post_id))]
    pub async fn create_comment(
        &self,
        session: &Session,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let content = request.content.trim();
        Comment::validate(content)?;
        self.ensure_post(request.post_id).await?;

        let comment = self
            .ctx
            .comment_repo()
            .create(&NewComment {
                post_id: request.post_id,
                user_id: session.user_id,
                content: content.to_string(),
            })
            .await?;

        info!(comment_id = %comment.id, "Comment created");
        Ok(CommentResponse::from(comment))
    }

    /// Delete a comment and its votes; author or admin only
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn delete_comment(
        &self,
        session: &Session,
        comment_id: Id,
    ) -> ServiceResult<MessageResponse> {
        let comment = self.load(comment_id).await?;
        if !comment.can_be_deleted_by(session.user_id, session.role) {
            return Err(DomainError::NotCommentAuthor("delete").into());
        }

        self.ctx.comment_repo().delete(comment_id).await?;

        info!(comment_id = %comment_id, "Comment deleted");
        Ok(MessageResponse::new("Comment deleted successfully"))
    }

    /// Toggle the caller's vote and return the refreshed comment
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn vote(
        &self,
        session: &Session,
        comment_id: Id,
        direction: VoteDirection,
    ) -> ServiceResult<VoteResponse<CommentResponse>> {
        let tally = self
            .ctx
            .vote_repo()
            .apply_vote(VoteSubject::comment(comment_id), session.user_id, direction)
            .await?;

        debug!(
            upvotes = tally.upvotes,
            downvotes = tally.downvotes,
            "Comment vote applied"
        );

        let comment = self.load(comment_id).await?;
        Ok(VoteResponse {
            subject: CommentResponse::from(comment),
            user_vote: tally.viewer_vote,
        })
    }

    async fn ensure_post(&self, post_id: Id) -> ServiceResult<()> {
        if self.ctx.post_repo().exists(post_id).await? {
            Ok(())
        } else {
            Err(ServiceError::not_found("Post", post_id))
        }
    }

    async fn load(&self, comment_id: Id) -> ServiceResult<Comment> {
        self.ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment", comment_id))
    }
}
