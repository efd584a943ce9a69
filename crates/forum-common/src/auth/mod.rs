//! Credential and session utilities

mod jwt;
mod password;

pub use jwt::{Claims, JwtService, Session, DEFAULT_TOKEN_EXPIRY_SECS};
pub use password::{hash_password, verify_password, PasswordService};
