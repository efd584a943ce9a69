//! Comment entity - a reply under a post

use chrono::{DateTime, Utc};

use super::text::require_text;
use crate::error::DomainError;
use crate::value_objects::{Id, Role};

/// Comment joined with its author's username
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Id,
    pub post_id: Id,
    pub user_id: Id,
    pub author_username: String,
    pub content: String,
    pub upvotes: i32,
    pub downvotes: i32,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub const CONTENT_MAX_LEN: usize = 200;

    pub fn validate(content: &str) -> Result<(), DomainError> {
        require_text("Comment", content, Self::CONTENT_MAX_LEN)
    }

    #[inline]
    pub fn is_owned_by(&self, user_id: Id) -> bool {
        self.user_id == user_id
    }

    #[inline]
    pub fn can_be_deleted_by(&self, user_id: Id, role: Role) -> bool {
        self.is_owned_by(user_id) || role.is_admin()
    }
}

/// Data required to insert a comment
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: Id,
    pub user_id: Id,
    pub content: String,
}
