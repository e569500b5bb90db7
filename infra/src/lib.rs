//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the admin backend,
//! providing concrete implementations for persistence, caching and email
//! delivery behind the traits defined in `mt_core`.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Database**: PostgreSQL implementations using SQLx
//! - **Cache**: Redis client and the shared OTP replay guard
//! - **Mail**: SMTP delivery through lettre plus a console mock
//!
//! ## Features
//!
//! - `postgres`: Enable PostgreSQL database support (default)
//! - `redis-cache`: Enable Redis caching support (default)

// Re-export core types for convenience
pub use mt_core::errors::*;

/// Database module - PostgreSQL implementations using SQLx
#[cfg(feature = "postgres")]
pub mod database;

/// Mail module - Outbound email transports
pub mod mail;

/// Cache module - Redis client and operations
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Configuration types used by infrastructure services
pub mod config {
    pub use mt_shared::config::{CacheConfig, DatabaseConfig, MailConfig, MailProvider};
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Mail transport error
    #[error("Mail service error: {0}")]
    Mail(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        DomainError::Internal {
            message: error.to_string(),
        }
    }
}
