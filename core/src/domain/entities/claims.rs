//! Claim set carried by a verification token.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::OtpError;

use super::purpose::Purpose;

/// Claims signed into an email verification token
///
/// The token is self-contained: no server-side record of the code exists,
/// so everything needed to check a submission lives here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationClaims {
    /// Identity the code was sent to (normalized email)
    pub sub: String,
    /// The six digit code
    pub code: String,
    /// What the code authorizes
    pub purpose: Purpose,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiry (Unix seconds)
    pub exp: i64,
    /// Unique token id, used by replay guards
    pub jti: String,
}

impl VerificationClaims {
    /// Build claims expiring `ttl` from now
    ///
    /// A lifetime that overflows the timestamp range is a signing
    /// misconfiguration.
    pub fn new(
        identity: impl Into<String>,
        code: impl Into<String>,
        purpose: Purpose,
        ttl: Duration,
    ) -> Result<Self, OtpError> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(ttl).ok_or_else(|| OtpError::Encoding {
            message: format!("token lifetime of {} seconds is out of range", ttl.num_seconds()),
        })?;

        Ok(Self {
            sub: identity.into(),
            code: code.into(),
            purpose,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .unwrap_or_else(Utc::now)
    }

    /// Whether `now` is past the expiry
    ///
    /// Compared at sub-second precision: the token is dead from the first
    /// instant after `exp`, not from the next whole second.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at()
    }
}
