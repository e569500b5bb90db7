//! Password strength rules

use crate::errors::ValidationError;

/// Shortest accepted password
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Require at least eight characters with a letter and a digit
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::WeakPassword {
            reason: format!("must be at least {} characters long", MIN_PASSWORD_LENGTH),
        });
    }
    if !password.chars().any(|c| c.is_alphabetic()) {
        return Err(ValidationError::WeakPassword {
            reason: "must contain at least one letter".to_string(),
        });
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::WeakPassword {
            reason: "must contain at least one digit".to_string(),
        });
    }
    Ok(())
}
