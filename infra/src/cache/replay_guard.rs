//! Redis-backed replay guard shared by every API instance

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};

use mt_core::services::otp::ReplayGuardTrait;

use super::redis_client::RedisClient;

/// Key namespace for consumed token ids
const USED_TOKEN_NAMESPACE: &str = "otp:used";

/// Records consumed token ids in Redis with `SET NX EX`
///
/// Token ids are hashed before they are used as keys. Each key lives only
/// as long as the token it belongs to.
#[derive(Clone)]
pub struct RedisReplayGuard {
    client: RedisClient,
}

impl RedisReplayGuard {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Cache key for a token id
    pub fn key_for(&self, jti: &str) -> String {
        self.client
            .config()
            .prefixed(&format!("{}:{}", USED_TOKEN_NAMESPACE, hash_token_id(jti)))
    }
}

/// SHA-256 of a token id, hex encoded
pub fn hash_token_id(jti: &str) -> String {
    hex::encode(Sha256::digest(jti.as_bytes()))
}

/// Seconds to keep a consumed id: the remaining lifetime rounded up, plus one
pub fn remaining_ttl_secs(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let remaining_ms = (expires_at - now).num_milliseconds().max(0);
    let remaining_secs = (remaining_ms + 999) / 1000;
    (remaining_secs + 1) as u64
}

#[async_trait]
impl ReplayGuardTrait for RedisReplayGuard {
    async fn consume(&self, jti: &str, expires_at: DateTime<Utc>) -> Result<bool, String> {
        let key = self.key_for(jti);
        let ttl = remaining_ttl_secs(expires_at, Utc::now());
        self.client
            .set_if_absent(&key, "1", ttl)
            .await
            .map_err(|e| e.to_string())
    }

    async fn release(&self, jti: &str) -> Result<(), String> {
        self.client
            .delete(&self.key_for(jti))
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
