//! Post service
//!
//! Listing, reading, authoring, deleting and voting on posts.

use forum_common::auth::Session;
use forum_core::entities::{NewPost, Post, PostUpdate, VoteDirection, VoteSubject};
use forum_core::{DomainError, Id, PageRequest, PostSort};
use tracing::{debug, info, instrument};

use crate::dto::{
    CommentResponse, CreatePostRequest, MessageResponse, PostDetailResponse, PostListResponse,
    PostResponse, UpdatePostRequest, VoteResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// One page of posts in the requested order
    #[instrument(skip(self))]
    pub async fn list_posts(
        &self,
        page: PageRequest,
        sort: PostSort,
    ) -> ServiceResult<PostListResponse> {
        let posts = self.ctx.post_repo().list(page, sort).await?;
        debug!(total = posts.total, returned = posts.items.len(), "Listed posts");
        Ok(PostListResponse::from(posts))
    }

    /// A post with all of its comments
    #[instrument(skip(self))]
    pub async fn get_post(&self, post_id: Id) -> ServiceResult<PostDetailResponse> {
        let post = self.load(post_id).await?;
        let comments = self.ctx.comment_repo().list_all_by_post(post_id).await?;

        Ok(PostDetailResponse {
            post: PostResponse::from(post),
            comments: comments.into_iter().map(CommentResponse::from).collect(),
        })
    }

    #[instrument(skip(self, session, request), fields(user_id = %session.user_id))]
    pub async fn create_post(
        &self,
        session: &Session,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let title = request.title.trim();
        let content = request.content.trim();
        Post::validate(title, content)?;

        let post = self
            .ctx
            .post_repo()
            .create(&NewPost {
                user_id: session.user_id,
                title: title.to_string(),
                content: content.to_string(),
            })
            .await?;

        info!(post_id = %post.id, "Post created");
        Ok(PostResponse::from(post))
    }

    /// Replace title and content; only the author may edit
    #[instrument(skip(self, session, request), fields(user_id = %session.user_id))]
    pub async fn update_post(
        &self,
        session: &Session,
        post_id: Id,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let title = request.title.trim();
        let content = request.content.trim();
        Post::validate(title, content)?;

        let post = self.load(post_id).await?;
        if !post.is_owned_by(session.user_id) {
            return Err(DomainError::NotPostAuthor("edit").into());
        }

        let updated = self
            .ctx
            .post_repo()
            .update(
                post_id,
                &PostUpdate {
                    title: title.to_string(),
                    content: content.to_string(),
                },
            )
            .await?;

        info!(post_id = %post_id, "Post updated");
        Ok(PostResponse::from(updated))
    }

    /// Delete a post with its comments and votes; author or admin only
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn delete_post(&self, session: &Session, post_id: Id) -> ServiceResult<MessageResponse> {
        let post = self.load(post_id).await?;
        if !post.can_be_deleted_by(session.user_id, session.role) {
            return Err(DomainError::NotPostAuthor("delete").into());
        }

        self.ctx.post_repo().delete(post_id).await?;

        info!(post_id = %post_id, by_admin = !post.is_owned_by(session.user_id), "Post deleted");
        Ok(MessageResponse::new("Post deleted successfully"))
    }

    /// Toggle the caller's vote and return the refreshed post
    #[instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn vote(
        &self,
        session: &Session,
        post_id: Id,
        direction: VoteDirection,
    ) -> ServiceResult<VoteResponse<PostResponse>> {
        let tally = self
            .ctx
            .vote_repo()
            .apply_vote(VoteSubject::post(post_id), session.user_id, direction)
            .await?;

        debug!(
            upvotes = tally.upvotes,
            downvotes = tally.downvotes,
            "Post vote applied"
        );

        let post = self.load(post_id).await?;
        Ok(VoteResponse {
            subject: PostResponse::from(post),
            user_vote: tally.viewer_vote,
        })
    }

    async fn load(&self, post_id: Id) -> ServiceResult<Post> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", post_id))
    }
}
