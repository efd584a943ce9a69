//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use forum_core::{Comment, Page, Post, User};

use super::responses::{
    CommentListResponse, CommentResponse, CurrentUserResponse, PaginationMeta, PostListResponse,
    PostResponse, PublicUserResponse, UserListResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

impl From<&User> for CurrentUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

impl From<User> for CurrentUserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<User> for PublicUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

impl From<Page<User>> for UserListResponse {
    fn from(page: Page<User>) -> Self {
        let pagination = PaginationMeta::from(&page);
        Self {
            users: page.items.into_iter().map(Into::into).collect(),
            pagination,
        }
    }
}

// ============================================================================
// Post Mappers
// ============================================================================

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            username: post.author_username,
            title: post.title,
            content: post.content,
            upvotes: post.upvotes,
            downvotes: post.downvotes,
            comment_count: post.comment_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

impl From<Page<Post>> for PostListResponse {
    fn from(page: Page<Post>) -> Self {
        let pagination = PaginationMeta::from(&page);
        Self {
            posts: page.items.into_iter().map(Into::into).collect(),
            pagination,
        }
    }
}

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            username: comment.author_username,
            content: comment.content,
            upvotes: comment.upvotes,
            downvotes: comment.downvotes,
            created_at: comment.created_at,
        }
    }
}

impl From<Page<Comment>> for CommentListResponse {
    fn from(page: Page<Comment>) -> Self {
        let pagination = PaginationMeta::from(&page);
        Self {
            comments: page.items.into_iter().map(Into::into).collect(),
            pagination,
        }
    }
}
