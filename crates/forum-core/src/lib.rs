//! # forum-core
//!
//! Domain layer containing entities, value objects, the vote state machine and
//! repository traits. This crate has zero dependencies on infrastructure
//! (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Comment, LedgerChange, NewComment, NewPost, NewUser, Post, PostUpdate, SubjectKind, User,
    Vote, VoteDirection, VoteSubject, VoteTally, VoteTransition,
};
pub use error::DomainError;
pub use traits::{
    CommentRepository, PostRepository, RepoResult, UserRepository, VoteRepository,
};
pub use value_objects::{Id, IdParseError, Page, PageRequest, PostSort, Role, RoleParseError};
