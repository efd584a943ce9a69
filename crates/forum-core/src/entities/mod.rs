//! Domain entities - core business objects

mod comment;
mod post;
mod text;
mod user;
mod vote;

pub use comment::{Comment, NewComment};
pub use post::{NewPost, Post, PostUpdate};
pub use user::{NewUser, User};
pub use vote::{
    LedgerChange, SubjectKind, Vote, VoteDirection, VoteSubject, VoteTally, VoteTransition,
};
