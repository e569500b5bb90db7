//! User repository trait defining the interface for user data persistence.
//!
//! The verification flows only need to look a user up by email and flip the
//! two fields they own: the email verification flag and the password hash.

use async_trait::async_trait;

use crate::domain::entities::user::UserRecord;
use crate::errors::DomainError;

/// Repository trait for user persistence operations used by account flows
///
/// Emails are passed in normalized (trimmed, lowercase) form.
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use mt_core::repositories::UserRepository;
/// use mt_core::domain::entities::user::UserRecord;
/// use mt_core::errors::DomainError;
///
/// struct PgUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for PgUserRepository {
///     async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError> {
///         Ok(None)
///     }
///
///     async fn mark_email_verified(&self, email: &str) -> Result<bool, DomainError> {
///         Ok(false)
///     }
///
///     async fn update_password(&self, email: &str, password_hash: &str) -> Result<bool, DomainError> {
///         Ok(false)
///     }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email address
    ///
    /// # Returns
    /// * `Ok(Some(UserRecord))` - User found
    /// * `Ok(None)` - No user registered with this email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError>;

    /// Mark the user's email as verified and activate the account
    ///
    /// # Returns
    /// * `Ok(true)` - User updated
    /// * `Ok(false)` - No user registered with this email
    async fn mark_email_verified(&self, email: &str) -> Result<bool, DomainError>;

    /// Replace the user's password hash
    ///
    /// # Returns
    /// * `Ok(true)` - User updated
    /// * `Ok(false)` - No user registered with this email
    async fn update_password(&self, email: &str, password_hash: &str) -> Result<bool, DomainError>;
}
