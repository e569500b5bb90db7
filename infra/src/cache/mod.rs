//! Cache module for Redis-based caching
//!
//! This module provides Redis functionality for the admin backend: a
//! resilient client with retry logic and the shared replay guard used to
//! make verification tokens single-use across instances.

pub mod redis_client;
pub mod replay_guard;


pub use redis_client::RedisClient;
pub use replay_guard::RedisReplayGuard;

// Re-export commonly used types
pub use mt_shared::config::CacheConfig;
