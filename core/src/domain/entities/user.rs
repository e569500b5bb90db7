//! User entity as seen by the verification flows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered administrative user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Login email, stored lowercased
    pub email: String,

    /// Unique username
    pub username: String,

    pub first_name: String,

    pub last_name: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Whether the email address has been confirmed
    pub email_verified: bool,

    /// Whether the account may sign in
    pub is_active: bool,

    /// Assigned role
    pub role_id: Option<i64>,

    /// Owning organization (tenant)
    pub organization_id: Option<i64>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Creates a new, unverified and inactive user
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into().to_lowercase(),
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            password_hash: password_hash.into(),
            email_verified: false,
            is_active: false,
            role_id: None,
            organization_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Display name used in emails
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Confirm the email address; an unverified account becomes active
    pub fn mark_email_verified(&mut self) {
        self.email_verified = true;
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    /// Replace the stored password hash
    pub fn set_password_hash(&mut self, password_hash: impl Into<String>) {
        self.password_hash = password_hash.into();
        self.updated_at = Utc::now();
    }
}
