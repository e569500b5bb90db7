//! One-time passcode value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::ValidationError;

/// Length of every OTP code
pub const CODE_LENGTH: usize = 6;

/// Smallest code value; codes never start with a zero
pub const CODE_MIN: u32 = 100_000;

/// Largest code value
pub const CODE_MAX: u32 = 999_999;

/// A six digit decimal passcode
///
/// Never persisted. It lives inside a signed verification token and in the
/// response to the issuing call. `Debug` output is redacted so codes do not
/// leak through structured logging.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OtpCode(String);

impl OtpCode {
    /// Build a code from its numeric value
    pub fn from_value(value: u32) -> Result<Self, ValidationError> {
        if !(CODE_MIN..=CODE_MAX).contains(&value) {
            return Err(ValidationError::InvalidFormat {
                field: "otp_code".to_string(),
            });
        }
        Ok(Self(value.to_string()))
    }

    /// Parse a code from user input
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.len() != CODE_LENGTH || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidFormat {
                field: "otp_code".to_string(),
            });
        }
        let value: u32 = trimmed.parse().map_err(|_| ValidationError::InvalidFormat {
            field: "otp_code".to_string(),
        })?;
        Self::from_value(value)
    }

    /// The code as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the code, returning the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OtpCode(******)")
    }
}

impl AsRef<str> for OtpCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
