//! Types for account service results

use serde::Serialize;

use crate::services::otp::{IssueResult, VerifyFailure};

/// Outcome of an account action
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountActionResult {
    /// Whether the action completed
    pub success: bool,
    /// Human-readable outcome
    pub detail: String,
    /// Verification failure reason, when the submitted code was rejected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<VerifyFailure>,
}

impl AccountActionResult {
    pub fn succeeded(detail: impl Into<String>) -> Self {
        Self {
            success: true,
            detail: detail.into(),
            reason: None,
        }
    }

    pub fn rejected(reason: VerifyFailure) -> Self {
        Self {
            success: false,
            detail: reason.message().to_string(),
            reason: Some(reason),
        }
    }
}

impl From<&IssueResult> for AccountActionResult {
    fn from(issued: &IssueResult) -> Self {
        Self {
            success: issued.success,
            detail: issued.detail.clone(),
            reason: None,
        }
    }
}
