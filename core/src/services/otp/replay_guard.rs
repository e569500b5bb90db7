//! In-process replay guard

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use super::traits::ReplayGuardTrait;

/// Remembers consumed token ids until their tokens expire
///
/// Suitable for a single instance deployment or tests. Multi-instance
/// deployments need a shared store such as Redis.
#[derive(Debug, Default)]
pub struct InMemoryReplayGuard {
    consumed: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl InMemoryReplayGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of token ids currently remembered
    pub async fn len(&self) -> usize {
        self.consumed.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ReplayGuardTrait for InMemoryReplayGuard {
    async fn consume(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<bool, String> {
        let now = Utc::now();
        let mut consumed = self.consumed.lock().await;

        // Tokens are rejected from the first instant after expiry; keep one
        // extra second so whole-second expiries never open a gap
        consumed.retain(|_, expiry| {
            expiry
                .checked_add_signed(Duration::seconds(1))
                .map_or(true, |kept_until| kept_until >= now)
        });

        if consumed.contains_key(jti) {
            return Ok(false);
        }
        consumed.insert(jti.to_string(), expires_at);
        Ok(true)
    }

    async fn release(&self, jti: &str) -> Result<(), String> {
        self.consumed.lock().await.remove(jti);
        Ok(())
    }
}
