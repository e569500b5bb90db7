//! Shared utilities and common types for the admin backend
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Error types and response structures
//! - Utility functions (email validation and masking)

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment,
    DatabaseConfig, CacheConfig, MailConfig, OtpConfig,
    ServerConfig, CorsConfig, LoggingConfig, LogFormat,
};
pub use errors::{ErrorResponse, IntoErrorResponse, ApiResult, error_codes};
pub use types::{ApiResponse, HealthResponse, HealthStatus};
pub use utils::validation;
