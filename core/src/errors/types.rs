//! Error types for OTP issuance, token decoding and input validation

use mt_shared::errors::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Errors raised while issuing a one-time passcode
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// The OS random source could not produce bytes
    #[error("Entropy source unavailable")]
    EntropyUnavailable,

    /// The signing subsystem is misconfigured or failed to sign
    #[error("Token encoding failed: {message}")]
    Encoding { message: String },

    /// The mail transport rejected the message or timed out
    #[error("Email delivery failed: {message}")]
    DeliveryFailure { message: String },
}

impl OtpError {
    /// Delivery failures are reported to the caller; everything else is fatal
    pub fn is_fatal(&self) -> bool {
        !matches!(self, OtpError::DeliveryFailure { .. })
    }
}

/// Verification token decoding errors
///
/// Each variant is user-actionable: an expired link may be resent, a
/// tampered or garbage link is rejected outright.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("Verification link is malformed")]
    Malformed,

    #[error("Verification link signature is invalid")]
    InvalidSignature,

    #[error("Verification link has expired")]
    Expired,
}

impl TokenError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Malformed => error_codes::OTP_MALFORMED,
            TokenError::InvalidSignature => error_codes::OTP_INVALID_SIGNATURE,
            TokenError::Expired => error_codes::OTP_EXPIRED,
        }
    }
}

impl IntoErrorResponse for TokenError {
    fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::new(self.code(), self.to_string())
    }
}

/// Validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },

    #[error("Invalid email")]
    InvalidEmail,

    #[error("Unknown email purpose: {value}")]
    UnknownPurpose { value: String },

    #[error("Weak password: {reason}")]
    WeakPassword { reason: String },
}

impl IntoErrorResponse for ValidationError {
    fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::new(error_codes::VALIDATION_ERROR, self.to_string())
    }
}
