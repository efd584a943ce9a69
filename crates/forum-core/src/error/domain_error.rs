//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Id;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found")]
    UserNotFound(Id),

    #[error("Post not found")]
    PostNotFound(Id),

    #[error("Comment not found")]
    CommentNotFound(Id),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    InvalidUsername(String),

    #[error("{0}")]
    WeakPassword(String),

    #[error("{0} is required")]
    EmptyField(&'static str),

    #[error("{field} cannot exceed {max} characters")]
    ContentTooLong { field: &'static str, max: usize },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    /// Acting user neither owns the post nor is an admin. Carries the verb.
    #[error("You can only {0} your own posts")]
    NotPostAuthor(&'static str),

    #[error("You can only {0} your own comments")]
    NotCommentAuthor(&'static str),

    #[error("Access denied. Admin role required")]
    AdminRequired,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Username already taken")]
    UsernameTaken,

    #[error("Email already registered")]
    EmailAlreadyExists,

    // =========================================================================
    // Infrastructure Errors
    // =========================================================================
    #[error("Vote could not be applied after {attempts} attempts")]
    VoteContention { attempts: u32 },

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::EmptyField(_) => "EMPTY_FIELD",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Authorization
            Self::NotPostAuthor(_) => "NOT_POST_AUTHOR",
            Self::NotCommentAuthor(_) => "NOT_COMMENT_AUTHOR",
            Self::AdminRequired => "ADMIN_REQUIRED",

            // Conflict
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",

            // Infrastructure
            Self::VoteContention { .. } => "VOTE_CONTENTION",
            Self::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_) | Self::PostNotFound(_) | Self::CommentNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidUsername(_)
                | Self::WeakPassword(_)
                | Self::EmptyField(_)
                | Self::ContentTooLong { .. }
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotPostAuthor(_) | Self::NotCommentAuthor(_) | Self::AdminRequired
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::UsernameTaken | Self::EmailAlreadyExists)
    }
}
