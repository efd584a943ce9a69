//! Post model -> entity mapper

use forum_core::{Id, Post};

use crate::models::PostModel;

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Id::new(model.id),
            user_id: Id::new(model.user_id),
            author_username: model.author_username,
            title: model.title,
            content: model.content,
            upvotes: model.upvotes,
            downvotes: model.downvotes,
            comment_count: model.comment_count,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
