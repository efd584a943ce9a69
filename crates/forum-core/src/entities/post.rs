//! Post entity - a top-level discussion thread

use chrono::{DateTime, Utc};

use super::text::require_text;
use crate::error::DomainError;
use crate::value_objects::{Id, Role};

/// Post as read back from storage, joined with its author's username and
/// the number of comments under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub id: Id,
    pub user_id: Id,
    pub author_username: String,
    pub title: String,
    pub content: String,
    pub upvotes: i32,
    pub downvotes: i32,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Post {
    pub const TITLE_MAX_LEN: usize = 255;
    pub const CONTENT_MAX_LEN: usize = 500;

    /// Validate a title/body pair for create and update
    pub fn validate(title: &str, content: &str) -> Result<(), DomainError> {
        require_text("Title", title, Self::TITLE_MAX_LEN)?;
        require_text("Content", content, Self::CONTENT_MAX_LEN)
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: Id) -> bool {
        self.user_id == user_id
    }

    /// Owners and admins may delete
    #[inline]
    pub fn can_be_deleted_by(&self, user_id: Id, role: Role) -> bool {
        self.is_owned_by(user_id) || role.is_admin()
    }
}

/// Data required to insert a post. Counters start at zero.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: Id,
    pub title: String,
    pub content: String,
}

/// Replacement title and body
#[derive(Debug, Clone)]
pub struct PostUpdate {
    pub title: String,
    pub content: String,
}
