//! PostgreSQL implementation of the UserRepository trait.
//!
//! Users live in the `users` table of the configured schema. Emails are
//! stored lowercased, so lookups compare against the normalized value.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use mt_core::domain::entities::user::UserRecord;
use mt_core::errors::DomainError;
use mt_core::repositories::UserRepository;

const SELECT_USER: &str = r#"
    SELECT id, email, username, first_name, last_name, password_hash,
           email_verified, is_active, role_id, organization_id,
           created_at, updated_at
    FROM users
"#;

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PostgreSQL user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a UserRecord
    fn row_to_user(row: &PgRow) -> Result<UserRecord, DomainError> {
        Ok(UserRecord {
            id: column::<Uuid>(row, "id")?,
            email: column(row, "email")?,
            username: column(row, "username")?,
            first_name: column(row, "first_name")?,
            last_name: column(row, "last_name")?,
            password_hash: column(row, "password_hash")?,
            email_verified: column(row, "email_verified")?,
            is_active: column(row, "is_active")?,
            role_id: column(row, "role_id")?,
            organization_id: column(row, "organization_id")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
            updated_at: column::<DateTime<Utc>>(row, "updated_at")?,
        })
    }
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|e| DomainError::Internal {
        message: format!("Failed to get {}: {}", name, e),
    })
}

fn query_failed(e: sqlx::Error) -> DomainError {
    DomainError::Internal {
        message: format!("Database query failed: {}", e),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError> {
        let query = format!("{} WHERE email = $1 LIMIT 1", SELECT_USER);

        let result = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_failed)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn mark_email_verified(&self, email: &str) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE users SET
                email_verified = TRUE,
                is_active = TRUE,
                updated_at = $2
            WHERE email = $1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE users SET
                password_hash = $2,
                updated_at = $3
            WHERE email = $1
        "#;

        let result = sqlx::query(query)
            .bind(email)
            .bind(password_hash)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(query_failed)?;

        Ok(result.rows_affected() > 0)
    }
}
