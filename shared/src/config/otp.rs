//! One-time passcode configuration

use serde::{Deserialize, Serialize};

/// Secret used when none is configured; rejected in production
pub const DEFAULT_OTP_SECRET: &str = "otp-secret-key-change-in-production";

/// Fixed number of digits in every OTP code
pub const OTP_CODE_LENGTH: usize = 6;

/// Longest accepted code lifetime (one day)
pub const MAX_OTP_EXPIRY_MINUTES: i64 = 24 * 60;

/// OTP signing and delivery configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// HMAC secret used to sign verification tokens
    pub secret_key: String,

    /// Signing algorithm name (HS256, HS384, HS512)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Number of digits in a code, fixed at 6
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Lifetime of an issued code in minutes
    #[serde(default = "default_expiry_minutes")]
    pub expiry_minutes: i64,

    /// Client base URL used to build the link embedded in emails
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound on a single mail transport call in seconds
    #[serde(default = "default_delivery_timeout_secs")]
    pub delivery_timeout_secs: u64,

    /// Company name rendered in email templates
    #[serde(default = "default_company_name")]
    pub company_name: String,

    /// Reject a token after its first successful verification
    #[serde(default)]
    pub single_use: bool,

    /// Echo the issued code in API responses (development only)
    #[serde(default)]
    pub expose_code_in_response: bool,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            secret_key: DEFAULT_OTP_SECRET.to_string(),
            algorithm: default_algorithm(),
            code_length: default_code_length(),
            expiry_minutes: default_expiry_minutes(),
            base_url: default_base_url(),
            delivery_timeout_secs: default_delivery_timeout_secs(),
            company_name: default_company_name(),
            single_use: false,
            expose_code_in_response: false,
        }
    }
}

impl std::fmt::Debug for OtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OtpConfig")
            .field("secret_key", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("code_length", &self.code_length)
            .field("expiry_minutes", &self.expiry_minutes)
            .field("base_url", &self.base_url)
            .field("delivery_timeout_secs", &self.delivery_timeout_secs)
            .field("company_name", &self.company_name)
            .field("single_use", &self.single_use)
            .field("expose_code_in_response", &self.expose_code_in_response)
            .finish()
    }
}

impl OtpConfig {
    /// Create a configuration with the given signing secret
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_env_with(Self::default())
    }

    /// Read environment variables over an existing profile
    pub fn from_env_with(base: Self) -> Self {
        let env_or = |key: &str, default: String| std::env::var(key).unwrap_or(default);

        Self {
            secret_key: env_or("OTP_CODE_SECRET_KEY", base.secret_key),
            algorithm: env_or("OTP_ALGORITHM", base.algorithm),
            code_length: base.code_length,
            expiry_minutes: std::env::var("OTP_CODE_EXPIRY_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(base.expiry_minutes),
            base_url: env_or("CLIENT_BASE_URL", base.base_url),
            delivery_timeout_secs: std::env::var("OTP_DELIVERY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(base.delivery_timeout_secs),
            company_name: env_or("COMPANY_NAME", base.company_name),
            single_use: std::env::var("OTP_SINGLE_USE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(base.single_use),
            expose_code_in_response: std::env::var("OTP_EXPOSE_CODE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(base.expose_code_in_response),
        }
    }

    /// Set the code expiry in minutes
    pub fn with_expiry_minutes(mut self, minutes: i64) -> Self {
        self.expiry_minutes = minutes;
        self
    }

    /// Set the client base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret_key == DEFAULT_OTP_SECRET
    }

    /// Validate the static shape of the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.secret_key.is_empty() {
            return Err("OTP secret key must not be empty".to_string());
        }
        if self.code_length != OTP_CODE_LENGTH {
            return Err(format!("OTP code length is fixed at {} digits", OTP_CODE_LENGTH));
        }
        if self.expiry_minutes <= 0 {
            return Err("OTP expiry must be at least one minute".to_string());
        }
        if self.expiry_minutes > MAX_OTP_EXPIRY_MINUTES {
            return Err(format!(
                "OTP expiry must not exceed {} minutes",
                MAX_OTP_EXPIRY_MINUTES
            ));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(format!("Invalid client base URL: {}", self.base_url));
        }
        if !matches!(self.algorithm.as_str(), "HS256" | "HS384" | "HS512") {
            return Err(format!("Unsupported OTP signing algorithm: {}", self.algorithm));
        }
        Ok(())
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}

fn default_code_length() -> usize {
    OTP_CODE_LENGTH
}

fn default_expiry_minutes() -> i64 {
    10
}

fn default_base_url() -> String {
    String::from("http://localhost:3000")
}

fn default_delivery_timeout_secs() -> u64 {
    15
}

fn default_company_name() -> String {
    String::from("Admin Console")
}
