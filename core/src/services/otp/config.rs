//! Configuration for the OTP service

use mt_shared::config::OtpConfig;

/// Runtime settings for [`super::OtpService`]
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Lifetime of codes issued without an explicit TTL, in minutes
    pub default_ttl_minutes: i64,
    /// Client base URL the verification link is built on
    pub base_url: String,
    /// Company name rendered in the email body
    pub company_name: String,
    /// Upper bound on a single delivery attempt, in seconds
    pub delivery_timeout_secs: u64,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self::from(&OtpConfig::default())
    }
}

impl From<&OtpConfig> for OtpServiceConfig {
    fn from(config: &OtpConfig) -> Self {
        Self {
            default_ttl_minutes: config.expiry_minutes,
            base_url: config.base_url.clone(),
            company_name: config.company_name.clone(),
            delivery_timeout_secs: config.delivery_timeout_secs,
        }
    }
}

impl OtpServiceConfig {
    /// Default TTL as a duration
    ///
    /// Saturates instead of panicking; an out-of-range lifetime is then
    /// rejected when the claims are built.
    pub fn default_ttl(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.default_ttl_minutes.max(0).saturating_mul(60_000))
    }

    /// Delivery timeout as a duration
    pub fn delivery_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.delivery_timeout_secs)
    }

    /// Verification link for a token: `{base_url}/{purpose-slug}/{token}`
    pub fn verification_url(&self, slug: &str, token: &str) -> String {
        format!("{}/{}/{}", self.base_url.trim_end_matches('/'), slug, token)
    }
}
