//! Domain-specific error types and error handling.
//!
//! Fatal conditions (entropy source, signing misconfiguration, storage
//! failures) travel as [`DomainError`]. Expected user-facing outcomes of the
//! OTP flow never do; they are reported in the structured service results.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types and utilities
pub use types::{OtpError, TokenError, ValidationError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Business rule violation: {message}")]
    BusinessRule { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Otp(#[from] OtpError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    ValidationErr(#[from] ValidationError),
}

impl DomainError {
    /// Whether the error means the system is broken rather than the input
    pub fn is_fatal(&self) -> bool {
        match self {
            DomainError::Internal { .. } => true,
            DomainError::Otp(e) => e.is_fatal(),
            _ => false,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
