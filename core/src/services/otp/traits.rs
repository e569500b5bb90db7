//! Traits for mail delivery and replay protection integration

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::envelope::DeliveryEnvelope;

/// Trait for mail transport integration
#[async_trait]
pub trait MailServiceTrait: Send + Sync {
    /// Deliver an OTP email, returning the transport message id
    async fn send(&self, envelope: &DeliveryEnvelope) -> Result<String, String>;
}

/// Trait for single-use token enforcement
#[async_trait]
pub trait ReplayGuardTrait: Send + Sync {
    /// Record a token id as used
    ///
    /// Returns `true` the first time `jti` is consumed and `false` on every
    /// later call until `expires_at` has passed.
    async fn consume(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<bool, String>;

    /// Forget a consumed token id so the token verifies once more
    async fn release(&self, jti: &str) -> Result<(), String>;
}
