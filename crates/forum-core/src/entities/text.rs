//! Length checks shared by posts, comments and usernames

use crate::error::DomainError;

/// Number of characters (Unicode scalar values), not bytes.
#[inline]
pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Require a non-blank value of at most `max` characters.
pub(crate) fn require_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField(field));
    }
    if char_len(value) > max {
        return Err(DomainError::ContentTooLong { field, max });
    }
    Ok(())
}
