//! # forum-service
//!
//! Application layer containing the forum use cases and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AdminService, AuthService, CommentService, PostService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, UserService,
};
