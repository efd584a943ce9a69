//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output. Field names are
//! snake_case, matching the stored columns the web client reads.

use chrono::{DateTime, Utc};
use forum_core::{Id, Role, VoteDirection};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Plain acknowledgement: `{ "message": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Page-number pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Total number of rows
    pub total: i64,
    /// Total number of pages
    pub pages: i64,
    /// Current page, 1-based
    pub current: u32,
}

impl<T> From<&forum_core::Page<T>> for PaginationMeta {
    fn from(page: &forum_core::Page<T>) -> Self {
        Self {
            total: page.total,
            pages: page.total_pages(),
            current: page.page,
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Identity returned alongside a session token
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Id,
    pub username: String,
    pub email: String,
    pub role: Role,
}

/// Authentication response with a session token
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserResponse,
    pub token: String,
}

impl AuthResponse {
    pub fn new(message: impl Into<String>, user: UserResponse, token: String) -> Self {
        Self {
            message: message.into(),
            user,
            token,
        }
    }
}

/// `GET /auth/me`
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUserResponse {
    pub id: Id,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// User Responses
// ============================================================================

/// Public profile, no email
#[derive(Debug, Clone, Serialize)]
pub struct PublicUserResponse {
    pub id: Id,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Admin listing of users
#[derive(Debug, Clone, Serialize)]
pub struct UserListResponse {
    pub users: Vec<CurrentUserResponse>,
    pub pagination: PaginationMeta,
}

// ============================================================================
// Post Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: Id,
    pub user_id: Id,
    pub username: String,
    pub title: String,
    pub content: String,
    pub upvotes: i32,
    pub downvotes: i32,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A post together with all of its comments
#[derive(Debug, Clone, Serialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub comments: Vec<CommentResponse>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub pagination: PaginationMeta,
}

// ============================================================================
// Comment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: Id,
    pub post_id: Id,
    pub user_id: Id,
    pub username: String,
    pub content: String,
    pub upvotes: i32,
    pub downvotes: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<CommentResponse>,
    pub pagination: PaginationMeta,
}

// ============================================================================
// Vote Responses
// ============================================================================

/// Refreshed subject after a vote, plus the caller's resulting vote
#[derive(Debug, Clone, Serialize)]
pub struct VoteResponse<T> {
    #[serde(flatten)]
    pub subject: T,
    pub user_vote: Option<VoteDirection>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each dependency
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
