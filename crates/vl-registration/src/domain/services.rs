//! # Domain Services
//!
//! Pure field validation shared by registration and edit.
//! Lengths are measured in characters, not bytes.

use crate::domain::invariants::limits;
use crate::errors::RegistrationError;

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn within(value: &str, min: usize, max: usize) -> bool {
    let len = char_len(value);
    len >= min && len <= max
}

/// Validates a user id (1-40 chars).
pub fn validate_user_id(user_id: &str) -> Result<(), RegistrationError> {
    if within(user_id, 1, limits::MAX_USER_ID_LEN) {
        Ok(())
    } else {
        Err(RegistrationError::InvalidUserId)
    }
}

/// Validates a registration hash (1-64 chars).
pub fn validate_hash(registration_hash: &str) -> Result<(), RegistrationError> {
    if within(registration_hash, 1, limits::MAX_HASH_LEN) {
        Ok(())
    } else {
        Err(RegistrationError::InvalidHash)
    }
}

/// Validates a title (1-100 chars).
pub fn validate_title(title: &str) -> Result<(), RegistrationError> {
    if within(title, 1, limits::MAX_TITLE_LEN) {
        Ok(())
    } else {
        Err(RegistrationError::InvalidTitle)
    }
}

/// Validates a description (0-500 chars).
pub fn validate_description(description: &str) -> Result<(), RegistrationError> {
    if char_len(description) <= limits::MAX_DESCRIPTION_LEN {
        Ok(())
    } else {
        Err(RegistrationError::InvalidDescription)
    }
}

/// Title and description checks, in that order.
pub fn validate_content(title: &str, description: &str) -> Result<(), RegistrationError> {
    validate_title(title)?;
    validate_description(description)
}

/// Field checks for a new registration, in priority order:
/// user id, hash, title, description.
pub fn validate_registration_fields(
    user_id: &str,
    registration_hash: &str,
    title: &str,
    description: &str,
) -> Result<(), RegistrationError> {
    validate_user_id(user_id)?;
    validate_hash(registration_hash)?;
    validate_content(title, description)
}

// =============================================================================
// TESTS
// =============================================================================
