//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::UserRecord;
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// In-memory user repository keyed by email
#[derive(Clone)]
pub struct MockUserRepository {
    users: Arc<RwLock<HashMap<String, UserRecord>>>,
    should_fail: Arc<AtomicBool>,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
            should_fail: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Repository whose every call fails with an internal error
    pub fn failing() -> Self {
        let repository = Self::new();
        repository.set_failing(true);
        repository
    }

    /// Switch failure simulation on or off
    pub fn set_failing(&self, failing: bool) {
        self.should_fail.store(failing, Ordering::SeqCst);
    }

    /// Seed a user
    pub async fn insert(&self, user: UserRecord) {
        self.users.write().await.insert(user.email.clone(), user);
    }

    /// Current state of a user
    pub async fn get(&self, email: &str) -> Option<UserRecord> {
        self.users.read().await.get(email).cloned()
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "Mock repository failure".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DomainError> {
        self.check()?;
        Ok(self.users.read().await.get(email).cloned())
    }

    async fn mark_email_verified(&self, email: &str) -> Result<bool, DomainError> {
        self.check()?;
        let mut users = self.users.write().await;
        match users.get_mut(email) {
            Some(user) => {
                user.mark_email_verified();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_password(&self, email: &str, password_hash: &str) -> Result<bool, DomainError> {
        self.check()?;
        let mut users = self.users.write().await;
        match users.get_mut(email) {
            Some(user) => {
                user.set_password_hash(password_hash);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
