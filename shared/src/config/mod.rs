//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical business areas:
//! - `cache` - Redis configuration (token replay guard)
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `mail` - Outbound email transport configuration
//! - `otp` - One-time passcode signing and delivery configuration
//! - `server` - HTTP server and CORS configuration

pub mod cache;
pub mod database;
pub mod environment;
pub mod mail;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use mail::{MailConfig, MailProvider};
pub use otp::OtpConfig;
pub use server::{CorsConfig, ServerConfig};

/// Prefix for environment overrides applied by [`AppConfig::load`]
pub const ENV_OVERRIDE_PREFIX: &str = "APP";

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Cache configuration
    pub cache: CacheConfig,

    /// OTP configuration
    pub otp: OtpConfig,

    /// Mail transport configuration
    pub mail: MailConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            cache: CacheConfig::default(),
            otp: OtpConfig::default(),
            mail: MailConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            otp: OtpConfig {
                expose_code_in_response: true,
                ..Default::default()
            },
            mail: MailConfig::mock(),
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
            ..Default::default()
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            mail: MailConfig {
                provider: MailProvider::Smtp,
                ..Default::default()
            },
            database: DatabaseConfig::new("postgres://prod-db:5432/admin")
                .with_max_connections(50),
            otp: OtpConfig {
                single_use: true,
                ..Default::default()
            },
            logging: LoggingConfig::for_environment(Environment::Production),
            ..Default::default()
        }
    }

    /// Load configuration from environment variables
    ///
    /// Starts from the environment profile and lets every sub-configuration
    /// read its own variables.
    pub fn from_env() -> Result<Self, String> {
        let env = Environment::from_env();
        let base = match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::development();
                config.environment = Environment::Staging;
                config.otp.expose_code_in_response = false;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        };

        Ok(Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            cache: CacheConfig::from_env(),
            otp: OtpConfig::from_env_with(base.otp.clone()),
            mail: MailConfig::from_env_with(base.mail.clone())?,
            cors: CorsConfig::from_env_with(base.cors.clone()),
            ..base
        })
    }

    /// Load configuration with file and environment overrides
    ///
    /// Layers, lowest priority first:
    /// 1. [`AppConfig::from_env`]
    /// 2. the optional environment file (`config.development.toml`, ...)
    /// 3. `APP__SECTION__KEY` environment variables
    pub fn load() -> Result<Self, config::ConfigError> {
        let base = Self::from_env().map_err(config::ConfigError::Message)?;
        let file = base.environment.config_file().to_string();

        let config = config::Config::builder()
            .add_source(config::Config::try_from(&base)?)
            .add_source(config::File::with_name(&file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_OVERRIDE_PREFIX)
                    .try_parsing(true)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate().map_err(config::ConfigError::Message)?;
        Ok(loaded)
    }

    /// Validate cross-cutting rules that depend on the environment
    pub fn validate(&self) -> Result<(), String> {
        self.otp.validate()?;

        if self.environment.is_production() {
            if self.otp.is_using_default_secret() {
                return Err("OTP secret key must be set in production".to_string());
            }
            if self.otp.expose_code_in_response {
                return Err("OTP codes must not be exposed in production responses".to_string());
            }
            if self.mail.provider == MailProvider::Mock {
                return Err("The mock mail transport cannot be used in production".to_string());
            }
        }

        Ok(())
    }
}
