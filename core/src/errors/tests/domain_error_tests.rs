//! Unit tests for domain error types

use crate::errors::{DomainError, OtpError, TokenError, ValidationError};
use mt_shared::errors::IntoErrorResponse;

#[test]
fn test_token_error_codes_are_distinct() {
    let codes = [
        TokenError::Malformed.code(),
        TokenError::InvalidSignature.code(),
        TokenError::Expired.code(),
    ];
    assert_eq!(codes[0], "OTP_MALFORMED");
    assert_eq!(codes[1], "OTP_INVALID_SIGNATURE");
    assert_eq!(codes[2], "OTP_EXPIRED");
}

#[test]
fn test_token_error_response() {
    let response = TokenError::Expired.to_error_response();
    assert_eq!(response.error, "OTP_EXPIRED");
    assert!(response.message.contains("expired"));
}

#[test]
fn test_fatal_classification() {
    assert!(DomainError::from(OtpError::EntropyUnavailable).is_fatal());
    assert!(DomainError::from(OtpError::Encoding { message: "no key".into() }).is_fatal());
    assert!(!DomainError::from(OtpError::DeliveryFailure { message: "smtp down".into() }).is_fatal());
    assert!(DomainError::Internal { message: "db".into() }.is_fatal());
    assert!(!DomainError::from(ValidationError::InvalidEmail).is_fatal());
    assert!(!DomainError::from(TokenError::Malformed).is_fatal());
}

#[test]
fn test_transparent_messages() {
    let error = DomainError::from(ValidationError::UnknownPurpose { value: "login".into() });
    assert_eq!(error.to_string(), "Unknown email purpose: login");

    let error = DomainError::NotFound { resource: "user".into() };
    assert_eq!(error.to_string(), "Resource not found: user");
}
