//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    ChangePasswordRequest, CreateCommentRequest, CreatePostRequest, LoginRequest,
    RegisterRequest, UpdatePostRequest, UpdateProfileRequest,
};

pub use responses::{
    AuthResponse, CommentListResponse, CommentResponse, CurrentUserResponse, HealthChecks,
    HealthResponse, MessageResponse, PaginationMeta, PostDetailResponse, PostListResponse,
    PostResponse, PublicUserResponse, ReadinessResponse, UserListResponse, UserResponse,
    VoteResponse,
};
