//! User entity - a forum account

use chrono::{DateTime, Utc};

use super::text::char_len;
use crate::error::DomainError;
use crate::value_objects::{Id, Role};

/// User account. The password hash never leaves the storage layer
/// except through `UserRepository::get_password_hash`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Id,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub const USERNAME_MIN_LEN: usize = 3;
    pub const USERNAME_MAX_LEN: usize = 50;
    pub const PASSWORD_MIN_LEN: usize = 6;
    pub const PASSWORD_MAX_LEN: usize = 128;

    /// Create a User with the default role
    pub fn new(id: Id, username: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            role: Role::User,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Update the username
    pub fn set_username(&mut self, username: String) {
        self.username = username;
        self.updated_at = Utc::now();
    }

    /// Check a candidate username
    pub fn validate_username(username: &str) -> Result<(), DomainError> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidUsername(
                "Username is required".to_string(),
            ));
        }
        let len = char_len(trimmed);
        if len < Self::USERNAME_MIN_LEN {
            return Err(DomainError::InvalidUsername(format!(
                "Username must be at least {} characters",
                Self::USERNAME_MIN_LEN
            )));
        }
        if len > Self::USERNAME_MAX_LEN {
            return Err(DomainError::InvalidUsername(format!(
                "Username cannot exceed {} characters",
                Self::USERNAME_MAX_LEN
            )));
        }
        Ok(())
    }

    /// Check a candidate plaintext password before hashing
    pub fn validate_password(password: &str) -> Result<(), DomainError> {
        let len = char_len(password);
        if len < Self::PASSWORD_MIN_LEN {
            return Err(DomainError::WeakPassword(format!(
                "Password must be at least {} characters",
                Self::PASSWORD_MIN_LEN
            )));
        }
        if len > Self::PASSWORD_MAX_LEN {
            return Err(DomainError::WeakPassword(format!(
                "Password cannot exceed {} characters",
                Self::PASSWORD_MAX_LEN
            )));
        }
        Ok(())
    }
}

/// Data required to insert a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}
