//! Post database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Post row joined with its author and comment count
#[derive(Debug, Clone, FromRow)]
pub struct PostModel {
    pub id: i64,
    pub user_id: i64,
    pub author_username: String,
    pub title: String,
    pub content: String,
    pub upvotes: i32,
    pub downvotes: i32,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
