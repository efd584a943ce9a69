//! Comment model -> entity mapper

use forum_core::{Comment, Id};

use crate::models::CommentModel;

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Id::new(model.id),
            post_id: Id::new(model.post_id),
            user_id: Id::new(model.user_id),
            author_username: model.author_username,
            content: model.content,
            upvotes: model.upvotes,
            downvotes: model.downvotes,
            created_at: model.created_at,
        }
    }
}
