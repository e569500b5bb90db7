//! Main OTP service implementation

use std::sync::Arc;

use chrono::Duration;
use constant_time_eq::constant_time_eq;

use mt_shared::utils::validation::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::claims::VerificationClaims;
use crate::domain::entities::envelope::{DeliveryEnvelope, EmailBody};
use crate::domain::entities::purpose::Purpose;
use crate::errors::{DomainError, DomainResult, OtpError};

use super::code_generator::{CodeGenerator, SecureCodeGenerator};
use super::config::OtpServiceConfig;
use super::token_codec::OtpTokenCodec;
use super::traits::{MailServiceTrait, ReplayGuardTrait};
use super::types::{IssueResult, OtpRecipient, VerifyFailure, VerifyResult};

/// Detail reported when the email was handed to the transport
pub const DELIVERY_SUCCESS_DETAIL: &str = "Email sent successfully at given email address";

/// Detail reported when the transport failed or timed out
pub const DELIVERY_FAILED_DETAIL: &str = "Email sending failed";

/// OTP service issuing codes by email and verifying them
///
/// Holds no per-code state: everything needed for verification travels in
/// the signed token.
pub struct OtpService<M: MailServiceTrait> {
    /// Mail transport
    mail_service: Arc<M>,
    /// Shared token codec
    codec: Arc<OtpTokenCodec>,
    /// Code source
    generator: Arc<dyn CodeGenerator>,
    /// Single-use enforcement, when enabled
    replay_guard: Option<Arc<dyn ReplayGuardTrait>>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<M: MailServiceTrait> OtpService<M> {
    /// Create a new OTP service
    ///
    /// # Arguments
    ///
    /// * `mail_service` - Mail transport implementation
    /// * `codec` - Token codec holding the signing secret
    /// * `config` - Service configuration
    pub fn new(mail_service: Arc<M>, codec: Arc<OtpTokenCodec>, config: OtpServiceConfig) -> Self {
        Self {
            mail_service,
            codec,
            generator: Arc::new(SecureCodeGenerator),
            replay_guard: None,
            config,
        }
    }

    /// Replace the code generator
    pub fn with_code_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Enforce single use of every token through `guard`
    pub fn with_replay_guard(mut self, guard: Arc<dyn ReplayGuardTrait>) -> Self {
        self.replay_guard = Some(guard);
        self
    }

    /// Service configuration
    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Whether a replay guard is installed
    pub fn is_single_use(&self) -> bool {
        self.replay_guard.is_some()
    }

    /// Issue a code for `identity`, greeting the recipient by address
    pub async fn issue(&self, identity: &str, purpose: Purpose, ttl: Duration) -> DomainResult<IssueResult> {
        self.issue_with(OtpRecipient::from_email(identity), purpose, ttl, None)
            .await
    }

    /// Issue a code with the configured default lifetime
    pub async fn send_otp(
        &self,
        recipient: OtpRecipient,
        purpose: Purpose,
        subject: Option<String>,
    ) -> DomainResult<IssueResult> {
        self.issue_with(recipient, purpose, self.config.default_ttl(), subject)
            .await
    }

    /// Issue a code and email it to `recipient`
    ///
    /// This method:
    /// 1. Normalizes and validates the recipient address
    /// 2. Generates a code from the OS random source
    /// 3. Signs a token binding code, identity and purpose
    /// 4. Builds the verification link and the email envelope
    /// 5. Hands the envelope to the transport under the delivery timeout
    ///
    /// # Returns
    ///
    /// * `Ok(IssueResult)` - Delivery outcome; transport failure is `success: false`
    /// * `Err(DomainError)` - Invalid address, entropy or signing failure
    pub async fn issue_with(
        &self,
        recipient: OtpRecipient,
        purpose: Purpose,
        ttl: Duration,
        subject: Option<String>,
    ) -> DomainResult<IssueResult> {
        let identity = normalize_email(&recipient.email);
        if !is_valid_email(&identity) {
            tracing::warn!(
                email = %mask_email(&identity),
                event = "otp_invalid_recipient",
                "Rejected OTP request for invalid email address"
            );
            return Err(DomainError::Validation {
                message: format!("Invalid email address: {}", mask_email(&identity)),
            });
        }

        let code = self.generator.generate()?;
        let claims = VerificationClaims::new(identity.as_str(), code.as_str(), purpose, ttl)?;
        let token = self.codec.encode_claims(&claims).map_err(|e| {
            tracing::error!(
                error = %e,
                event = "otp_encoding_failed",
                "Failed to sign verification token"
            );
            e
        })?;
        let url = self.config.verification_url(&purpose.slug(), &token);
        let expires_at = claims.expires_at();

        tracing::info!(
            email = %mask_email(&identity),
            purpose = %purpose,
            jti = %claims.jti,
            event = "otp_issued",
            "Issued verification code"
        );

        let subject = subject
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| purpose.default_subject().to_string());
        let user_name = if recipient.user_name.trim().is_empty() {
            identity.clone()
        } else {
            recipient.user_name.trim().to_string()
        };
        let envelope = DeliveryEnvelope::new(
            identity.clone(),
            subject,
            EmailBody {
                url: url.clone(),
                otp_code: code.as_str().to_string(),
                user_name,
                email_purpose: purpose.label().to_string(),
                company_name: self.config.company_name.clone(),
                base_url: self.config.base_url.clone(),
            },
        );

        match self.deliver(&envelope).await {
            Ok(message_id) => {
                tracing::info!(
                    email = %mask_email(&identity),
                    message_id = %message_id,
                    event = "otp_delivered",
                    "Verification email sent"
                );
                Ok(IssueResult {
                    success: true,
                    code: Some(code),
                    token,
                    url,
                    expires_at,
                    message_id: Some(message_id),
                    detail: DELIVERY_SUCCESS_DETAIL.to_string(),
                })
            }
            Err(e) => {
                tracing::warn!(
                    email = %mask_email(&identity),
                    error = %e,
                    event = "otp_delivery_failed",
                    "Verification email could not be sent"
                );
                Ok(IssueResult {
                    success: false,
                    code: None,
                    token,
                    url,
                    expires_at,
                    message_id: None,
                    detail: DELIVERY_FAILED_DETAIL.to_string(),
                })
            }
        }
    }

    /// Verify a submitted code against its token
    ///
    /// # Returns
    ///
    /// * `Ok(VerifyResult)` - Success with identity and purpose, or a failure reason
    /// * `Err(DomainError)` - Replay guard storage failure
    pub async fn verify(&self, token: &str, submitted_code: &str) -> DomainResult<VerifyResult> {
        self.verify_inner(token, submitted_code, None).await
    }

    /// Verify a submitted code and require the token to carry `expected`
    pub async fn verify_for(
        &self,
        token: &str,
        submitted_code: &str,
        expected: Purpose,
    ) -> DomainResult<VerifyResult> {
        self.verify_inner(token, submitted_code, Some(expected)).await
    }

    async fn verify_inner(
        &self,
        token: &str,
        submitted_code: &str,
        expected: Option<Purpose>,
    ) -> DomainResult<VerifyResult> {
        let claims = match self.codec.decode(token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::warn!(
                    reason = e.code(),
                    event = "otp_token_rejected",
                    "Verification token rejected"
                );
                return Ok(VerifyResult::failed(e.into()));
            }
        };

        if !Self::codes_match(&claims.code, submitted_code.trim()) {
            tracing::warn!(
                email = %mask_email(&claims.sub),
                event = "otp_code_mismatch",
                "Submitted verification code does not match"
            );
            return Ok(VerifyResult::failed(VerifyFailure::CodeMismatch));
        }

        if let Some(expected) = expected {
            if claims.purpose != expected {
                tracing::warn!(
                    email = %mask_email(&claims.sub),
                    expected = %expected,
                    event = "otp_purpose_mismatch",
                    "Verification token used for a different purpose"
                );
                return Ok(VerifyResult::failed(VerifyFailure::PurposeMismatch));
            }
        }

        if let Some(guard) = &self.replay_guard {
            let first_use = guard
                .consume(&claims.jti, claims.expires_at())
                .await
                .map_err(|e| {
                    tracing::error!(
                        error = %e,
                        event = "otp_replay_guard_error",
                        "Replay guard unavailable"
                    );
                    DomainError::Internal {
                        message: format!("Failed to record token use: {}", e),
                    }
                })?;
            if !first_use {
                tracing::warn!(
                    email = %mask_email(&claims.sub),
                    jti = %claims.jti,
                    event = "otp_replay_rejected",
                    "Verification token already used"
                );
                return Ok(VerifyResult::failed(VerifyFailure::AlreadyUsed));
            }
        }

        tracing::info!(
            email = %mask_email(&claims.sub),
            purpose = %claims.purpose,
            event = "otp_verified",
            "Verification code accepted"
        );
        Ok(VerifyResult::verified(claims.sub, claims.purpose, claims.jti))
    }

    /// Let a verified token be used once more
    ///
    /// For callers whose follow-up write failed after verification. Does
    /// nothing without a replay guard.
    pub async fn release(&self, token_id: &str) -> DomainResult<()> {
        let guard = match &self.replay_guard {
            Some(guard) => guard,
            None => return Ok(()),
        };

        guard.release(token_id).await.map_err(|e| {
            tracing::error!(
                error = %e,
                event = "otp_replay_guard_error",
                "Replay guard unavailable"
            );
            DomainError::Internal {
                message: format!("Failed to release token: {}", e),
            }
        })?;

        tracing::info!(jti = %token_id, event = "otp_token_released", "Verification token released");
        Ok(())
    }

    async fn deliver(&self, envelope: &DeliveryEnvelope) -> Result<String, OtpError> {
        let timeout = self.config.delivery_timeout();
        match tokio::time::timeout(timeout, self.mail_service.send(envelope)).await {
            Ok(Ok(message_id)) => Ok(message_id),
            Ok(Err(message)) => Err(OtpError::DeliveryFailure { message }),
            Err(_) => Err(OtpError::DeliveryFailure {
                message: format!("timed out after {}s", timeout.as_secs()),
            }),
        }
    }

    /// Constant-time comparison of two codes
    fn codes_match(expected: &str, submitted: &str) -> bool {
        if expected.len() != submitted.len() {
            return false;
        }
        constant_time_eq(expected.as_bytes(), submitted.as_bytes())
    }
}
