//! Comment database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Comment row joined with its author
#[derive(Debug, Clone, FromRow)]
pub struct CommentModel {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub author_username: String,
    pub content: String,
    pub upvotes: i32,
    pub downvotes: i32,
    pub created_at: DateTime<Utc>,
}
