//! Signed verification token encoding and decoding

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use mt_shared::config::OtpConfig;

use crate::domain::entities::claims::VerificationClaims;
use crate::domain::entities::otp_code::OtpCode;
use crate::domain::entities::purpose::Purpose;
use crate::errors::{OtpError, TokenError};

/// HMAC-signed codec for [`VerificationClaims`]
///
/// Immutable after construction and safe to share behind an `Arc`.
#[derive(Clone)]
pub struct OtpTokenCodec {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for OtpTokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OtpTokenCodec")
            .field("algorithm", &self.algorithm)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl OtpTokenCodec {
    /// Creates a codec signing with `secret`
    ///
    /// Only HMAC algorithms are accepted. An empty secret or an asymmetric
    /// algorithm is a misconfiguration and yields [`OtpError::Encoding`].
    pub fn new(secret: &str, algorithm: Algorithm) -> Result<Self, OtpError> {
        if secret.is_empty() {
            return Err(OtpError::Encoding {
                message: "signing secret must not be empty".to_string(),
            });
        }
        if !matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(OtpError::Encoding {
                message: format!("unsupported signing algorithm {:?}", algorithm),
            });
        }

        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            algorithm,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Creates a codec from the OTP configuration section
    pub fn from_config(config: &OtpConfig) -> Result<Self, OtpError> {
        let algorithm = Algorithm::from_str(&config.algorithm).map_err(|_| OtpError::Encoding {
            message: format!("unknown signing algorithm {}", config.algorithm),
        })?;
        Self::new(&config.secret_key, algorithm)
    }

    /// Signing algorithm in use
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Signs a fresh claim set for `identity` expiring `ttl` from now
    pub fn encode(
        &self,
        identity: &str,
        code: &OtpCode,
        purpose: Purpose,
        ttl: Duration,
    ) -> Result<String, OtpError> {
        let claims = VerificationClaims::new(identity, code.as_str(), purpose, ttl)?;
        self.encode_claims(&claims)
    }

    /// Signs an already built claim set
    pub fn encode_claims(&self, claims: &VerificationClaims) -> Result<String, OtpError> {
        let header = Header::new(self.algorithm);
        encode(&header, claims, &self.encoding_key).map_err(|e| OtpError::Encoding {
            message: e.to_string(),
        })
    }

    /// Verifies the signature and expiry of `token` and returns its claims
    pub fn decode(&self, token: &str) -> Result<VerificationClaims, TokenError> {
        self.decode_at(token, Utc::now())
    }

    /// Like [`Self::decode`], judging expiry against `now`
    ///
    /// jsonwebtoken only compares whole seconds, so the sub-second check
    /// runs again on the decoded claims.
    pub fn decode_at(&self, token: &str, now: DateTime<Utc>) -> Result<VerificationClaims, TokenError> {
        let claims = decode::<VerificationClaims>(token.trim(), &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                _ => TokenError::Malformed,
            })?;

        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }
}
