//! Outbound email configuration

use serde::{Deserialize, Serialize};

/// Mail transport provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// SMTP relay with STARTTLS
    Smtp,
    /// Log messages instead of sending them
    #[default]
    Mock,
}

impl std::str::FromStr for MailProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "smtp" => Ok(MailProvider::Smtp),
            "mock" | "console" => Ok(MailProvider::Mock),
            _ => Err(format!("Unknown mail provider: {}", s)),
        }
    }
}

/// Mail transport configuration
#[derive(Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Provider used to deliver messages
    #[serde(default)]
    pub provider: MailProvider,

    /// SMTP relay host
    pub smtp_host: String,

    /// SMTP relay port
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username
    #[serde(default)]
    pub username: String,

    /// SMTP password
    #[serde(default)]
    pub password: String,

    /// Sender address
    pub from_address: String,

    /// Sender display name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// SMTP connection timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::Mock,
            smtp_host: String::from("localhost"),
            smtp_port: default_smtp_port(),
            username: String::new(),
            password: String::new(),
            from_address: String::from("no-reply@localhost"),
            from_name: default_from_name(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("provider", &self.provider)
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from_address", &self.from_address)
            .field("from_name", &self.from_name)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl MailConfig {
    /// Configuration for the console mock transport
    pub fn mock() -> Self {
        Self::default()
    }

    /// Configuration for an SMTP relay
    pub fn smtp(
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        from_address: impl Into<String>,
    ) -> Self {
        Self {
            provider: MailProvider::Smtp,
            smtp_host: host.into(),
            username: username.into(),
            password: password.into(),
            from_address: from_address.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, String> {
        Self::from_env_with(Self::default())
    }

    /// Read environment variables over an existing profile
    ///
    /// A `MAIL_PROVIDER` that names no known transport is an error.
    pub fn from_env_with(base: Self) -> Result<Self, String> {
        let provider = resolve_provider(std::env::var("MAIL_PROVIDER").ok(), base.provider)?;

        Ok(Self {
            provider,
            smtp_host: std::env::var("MAIL_SERVER").unwrap_or(base.smtp_host),
            smtp_port: std::env::var("MAIL_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(base.smtp_port),
            username: std::env::var("MAIL_USERNAME").unwrap_or(base.username),
            password: std::env::var("MAIL_PASSWORD").unwrap_or(base.password),
            from_address: std::env::var("MAIL_FROM").unwrap_or(base.from_address),
            from_name: std::env::var("MAIL_FROM_NAME").unwrap_or(base.from_name),
            timeout_secs: std::env::var("MAIL_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(base.timeout_secs),
        })
    }

    /// Sender mailbox in `Name <address>` form
    pub fn sender(&self) -> String {
        if self.from_name.is_empty() {
            self.from_address.clone()
        } else {
            format!("{} <{}>", self.from_name, self.from_address)
        }
    }
}

fn resolve_provider(raw: Option<String>, fallback: MailProvider) -> Result<MailProvider, String> {
    match raw {
        Some(value) if !value.trim().is_empty() => value.trim().parse(),
        _ => Ok(fallback),
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_name() -> String {
    String::from("Admin Console")
}

fn default_timeout_secs() -> u64 {
    10
}
