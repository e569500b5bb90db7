//! Database module - PostgreSQL implementations using SQLx
//!
//! This module provides the database access layer:
//! - Connection pool management
//! - Repository implementations for the traits in `mt_core`
//! - Schema migrations

pub mod connection;
pub mod postgres;

// Re-export commonly used types
pub use connection::DatabasePool;
pub use postgres::PgUserRepository;
