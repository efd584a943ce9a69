//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod admin;
pub mod auth;
pub mod comments;
pub mod health;
pub mod posts;
pub mod users;
