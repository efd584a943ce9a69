//! Database models - SQLx-compatible row structs

mod comment;
mod post;
mod user;

pub use comment::CommentModel;
pub use post::PostModel;
pub use user::UserModel;
