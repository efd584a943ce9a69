//! Sort orders for the post listing

use serde::{Deserialize, Serialize};

/// Ordering applied to `listPosts`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PostSort {
    /// Newest first
    #[default]
    Recent,
    /// Most upvoted first
    Upvotes,
    /// Most downvoted first
    Downvotes,
    /// Most commented first
    CommentCount,
}

impl PostSort {
    /// Resolve a query-string key. Unknown or missing keys fall back to `Recent`.
    pub fn from_key(key: Option<&str>) -> Self {
        match key.map(str::trim) {
            Some("upvotes") => Self::Upvotes,
            Some("downvotes") => Self::Downvotes,
            Some("commentCount" | "comments" | "comment_count") => Self::CommentCount,
            _ => Self::Recent,
        }
    }

    pub const fn as_key(self) -> &'static str {
        match self {
            Self::Recent => "recent",
            Self::Upvotes => "upvotes",
            Self::Downvotes => "downvotes",
            Self::CommentCount => "commentCount",
        }
    }
}
