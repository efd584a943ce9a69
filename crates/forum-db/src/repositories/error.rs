//! Error handling utilities for repositories

use forum_core::{DomainError, Id};
use sqlx::Error as SqlxError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Map a unique violation on the users table to the matching conflict
pub fn map_user_conflict(e: SqlxError) -> DomainError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some(name) if name.contains("email") => DomainError::EmailAlreadyExists,
                _ => DomainError::UsernameTaken,
            };
        }
    }
    map_db_error(e)
}

/// Check for a foreign key violation and return appropriate error or fallback
pub fn map_foreign_key_violation<F>(e: SqlxError, on_missing: F) -> DomainError
where
    F: FnOnce() -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_foreign_key_violation() {
            return on_missing();
        }
    }
    map_db_error(e)
}

pub fn user_not_found(id: Id) -> DomainError {
    DomainError::UserNotFound(id)
}

pub fn post_not_found(id: Id) -> DomainError {
    DomainError::PostNotFound(id)
}

pub fn comment_not_found(id: Id) -> DomainError {
    DomainError::CommentNotFound(id)
}
