//! Database configuration module

use serde::{Deserialize, Serialize};

/// Database configuration for PostgreSQL connections
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Connection timeout in seconds
    pub connect_timeout: u64,

    /// Schema holding the admin tables
    #[serde(default = "default_schema")]
    pub schema: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::from("postgres://localhost:5432/admin"),
            max_connections: 10,
            connect_timeout: 30,
            schema: default_schema(),
        }
    }
}

impl DatabaseConfig {
    /// Create from environment variables
    ///
    /// `DATABASE_URL` wins; otherwise the URL is assembled from the
    /// individual `DB_*` variables.
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| Self::assemble_url_from_env());
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .unwrap_or(10);
        let connect_timeout = std::env::var("DATABASE_CONNECT_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .unwrap_or(30);

        Self {
            url,
            max_connections,
            connect_timeout,
            schema: std::env::var("DB_SCHEMA").unwrap_or_else(|_| default_schema()),
        }
    }

    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    fn assemble_url_from_env() -> String {
        let var = |key: &str, default: &str| std::env::var(key).unwrap_or_else(|_| default.to_string());
        build_url(
            &var("DATABASE", "postgres"),
            &var("DB_USER", "postgres"),
            &var("DB_PASSWORD", "postgres"),
            &var("DB_HOST", "localhost"),
            &var("DB_PORT", "5432"),
            &var("DB_NAME", "admin"),
        )
    }
}

/// Assemble a connection URL from its parts
pub fn build_url(scheme: &str, user: &str, password: &str, host: &str, port: &str, name: &str) -> String {
    format!("{}://{}:{}@{}:{}/{}", scheme, user, password, host, port, name)
}

fn default_schema() -> String {
    String::from("public")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        assert_eq!(
            build_url("postgres", "admin", "secret", "db", "5432", "tenants"),
            "postgres://admin:secret@db:5432/tenants"
        );
    }

    #[test]
    fn test_with_max_connections() {
        let config = DatabaseConfig::new("postgres://db/admin").with_max_connections(25);
        assert_eq!(config.max_connections, 25);
        assert_eq!(config.schema, "public");
    }
}
