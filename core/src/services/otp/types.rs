//! Types for OTP service results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use mt_shared::errors::error_codes;
use mt_shared::utils::validation::normalize_email;

use crate::domain::entities::otp_code::OtpCode;
use crate::domain::entities::purpose::Purpose;
use crate::errors::TokenError;

/// Addressee of an OTP email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpRecipient {
    /// Destination address; also the identity bound into the token
    pub email: String,
    /// Display name used in the greeting
    pub user_name: String,
}

impl OtpRecipient {
    pub fn new(email: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            user_name: user_name.into(),
        }
    }

    /// Recipient greeted by the local part of their address
    pub fn from_email(email: impl Into<String>) -> Self {
        let email = email.into();
        let user_name = normalize_email(&email)
            .split('@')
            .next()
            .unwrap_or_default()
            .to_string();
        Self { email, user_name }
    }
}

/// Result of issuing a code
#[derive(Debug, Clone)]
pub struct IssueResult {
    /// Whether the email was handed to the transport
    pub success: bool,
    /// The issued code; only present when delivery succeeded
    pub code: Option<OtpCode>,
    /// Signed verification token
    pub token: String,
    /// Verification link embedded in the email
    pub url: String,
    /// When the token stops verifying
    pub expires_at: DateTime<Utc>,
    /// Transport message id, when delivery succeeded
    pub message_id: Option<String>,
    /// Human-readable outcome
    pub detail: String,
}

/// Why a verification attempt did not succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyFailure {
    CodeMismatch,
    Expired,
    InvalidSignature,
    Malformed,
    PurposeMismatch,
    AlreadyUsed,
}

impl VerifyFailure {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            VerifyFailure::CodeMismatch => "code_mismatch",
            VerifyFailure::Expired => "expired",
            VerifyFailure::InvalidSignature => "invalid_signature",
            VerifyFailure::Malformed => "malformed",
            VerifyFailure::PurposeMismatch => "purpose_mismatch",
            VerifyFailure::AlreadyUsed => "already_used",
        }
    }

    /// Stable error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            VerifyFailure::CodeMismatch => error_codes::OTP_CODE_MISMATCH,
            VerifyFailure::Expired => error_codes::OTP_EXPIRED,
            VerifyFailure::InvalidSignature => error_codes::OTP_INVALID_SIGNATURE,
            VerifyFailure::Malformed => error_codes::OTP_MALFORMED,
            VerifyFailure::PurposeMismatch => error_codes::OTP_PURPOSE_MISMATCH,
            VerifyFailure::AlreadyUsed => error_codes::OTP_ALREADY_USED,
        }
    }

    /// Message shown to the end user
    pub fn message(&self) -> &'static str {
        match self {
            VerifyFailure::CodeMismatch => "The verification code is incorrect",
            VerifyFailure::Expired => "The verification code has expired, please request a new one",
            VerifyFailure::InvalidSignature => "The verification link is not valid",
            VerifyFailure::Malformed => "The verification link is malformed",
            VerifyFailure::PurposeMismatch => "The verification link was issued for a different action",
            VerifyFailure::AlreadyUsed => "The verification code has already been used",
        }
    }
}

impl std::fmt::Display for VerifyFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<TokenError> for VerifyFailure {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::Malformed => VerifyFailure::Malformed,
            TokenError::InvalidSignature => VerifyFailure::InvalidSignature,
            TokenError::Expired => VerifyFailure::Expired,
        }
    }
}

/// Result of verifying a code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyResult {
    /// Whether the code was accepted
    pub success: bool,
    /// Identity the token was issued to, on success
    pub identity: Option<String>,
    /// Purpose the token was issued for, on success
    pub purpose: Option<Purpose>,
    /// Failure reason, when not successful
    pub reason: Option<VerifyFailure>,
    /// Id of the accepted token, for [`super::OtpService::release`]
    pub token_id: Option<String>,
}

impl VerifyResult {
    pub fn verified(identity: impl Into<String>, purpose: Purpose, token_id: impl Into<String>) -> Self {
        Self {
            success: true,
            identity: Some(identity.into()),
            purpose: Some(purpose),
            reason: None,
            token_id: Some(token_id.into()),
        }
    }

    pub fn failed(reason: VerifyFailure) -> Self {
        Self {
            success: false,
            identity: None,
            purpose: None,
            reason: Some(reason),
            token_id: None,
        }
    }
}
