//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;

use crate::entities::{
    Comment, NewComment, NewPost, NewUser, Post, PostUpdate, User, VoteDirection, VoteSubject,
    VoteTally,
};
use crate::error::DomainError;
use crate::value_objects::{Id, Page, PageRequest, PostSort};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<User>>;

    /// Find user by email (exact match)
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Check if a username is held by any user other than `excluding`
    async fn username_exists(&self, username: &str, excluding: Option<Id>) -> RepoResult<bool>;

    /// Check if email is already taken
    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    /// Create a new user
    async fn create(&self, user: &NewUser) -> RepoResult<User>;

    /// Change a user's username
    async fn update_username(&self, id: Id, username: &str) -> RepoResult<User>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: Id) -> RepoResult<Option<String>>;

    /// Update password hash
    async fn update_password(&self, id: Id, password_hash: &str) -> RepoResult<()>;

    /// List users, oldest first
    async fn list(&self, page: PageRequest) -> RepoResult<Page<User>>;
}

// ============================================================================
// Post Repository
// ============================================================================

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find post by ID, with author username and comment count
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Post>>;

    /// Check if a post exists
    async fn exists(&self, id: Id) -> RepoResult<bool>;

    /// One page of posts in the requested order
    async fn list(&self, page: PageRequest, sort: PostSort) -> RepoResult<Page<Post>>;

    /// Create a new post with zeroed counters
    async fn create(&self, post: &NewPost) -> RepoResult<Post>;

    /// Replace title and content, stamping `updated_at`
    async fn update(&self, id: Id, update: &PostUpdate) -> RepoResult<Post>;

    /// Delete a post after its comments and every vote attached to either
    async fn delete(&self, id: Id) -> RepoResult<()>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find comment by ID
    async fn find_by_id(&self, id: Id) -> RepoResult<Option<Comment>>;

    /// One page of a post's comments, most upvoted then newest first
    async fn list_by_post(&self, post_id: Id, page: PageRequest) -> RepoResult<Page<Comment>>;

    /// Every comment of a post, same ordering as `list_by_post`
    async fn list_all_by_post(&self, post_id: Id) -> RepoResult<Vec<Comment>>;

    /// Create a new comment with zeroed counters
    async fn create(&self, comment: &NewComment) -> RepoResult<Comment>;

    /// Delete a comment and its votes
    async fn delete(&self, id: Id) -> RepoResult<()>;
}

// ============================================================================
// Vote Repository
// ============================================================================

#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// Cast `direction` on `subject` for `voter_id`, atomically updating the
    /// ledger row and the subject's counters.
    ///
    /// Fails with the subject's not-found error if it does not exist.
    async fn apply_vote(
        &self,
        subject: VoteSubject,
        voter_id: Id,
        direction: VoteDirection,
    ) -> RepoResult<VoteTally>;

    /// Current vote of `voter_id` on `subject`
    async fn find_direction(
        &self,
        subject: VoteSubject,
        voter_id: Id,
    ) -> RepoResult<Option<VoteDirection>>;
}
