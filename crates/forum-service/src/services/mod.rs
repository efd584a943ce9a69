//! Business logic services
//!
//! Each service borrows a [`ServiceContext`] for the duration of a request and
//! performs validation and ownership checks before touching storage.

pub mod admin;
pub mod auth;
pub mod comment;
pub mod context;
pub mod error;
pub mod post;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

pub use admin::AdminService;
pub use auth::AuthService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use post::PostService;
pub use user::UserService;
