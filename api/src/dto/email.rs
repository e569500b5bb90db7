use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendOtpRequest {
    /// Recipient address; trimmed and lowercased by the service
    #[validate(length(min = 3, max = 254))]
    pub email: String,

    /// Name used in the greeting
    #[serde(default)]
    #[validate(length(max = 150))]
    pub user_name: String,

    /// Purpose label, e.g. "Email Verify" or "password-reset"
    #[validate(length(min = 1, max = 64))]
    pub email_purpose: String,

    /// Subject line; the purpose default is used when absent or blank
    #[serde(default)]
    #[validate(length(max = 200))]
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendOtpResponse {
    pub success: bool,
    pub detail: String,
    /// Only present when the server echoes codes (development)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub otp_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    /// Token from the verification link
    #[validate(length(min = 1, max = 4096))]
    pub token: String,

    /// Code typed by the user
    #[validate(length(min = 1, max = 32))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyOtpResponse {
    pub success: bool,
    pub identity: String,
    pub purpose: String,
}
