//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in forum-core.

mod comment;
mod error;
mod post;
mod user;
mod vote;

pub use comment::PgCommentRepository;
pub use post::PgPostRepository;
pub use user::PgUserRepository;
pub use vote::{PgVoteRepository, MAX_VOTE_ATTEMPTS};
