//! Main account service implementation

use std::sync::Arc;

use mt_shared::utils::validation::{mask_email, normalize_email};

use crate::domain::entities::purpose::Purpose;
use crate::domain::entities::user::UserRecord;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::otp::{MailServiceTrait, OtpRecipient, OtpService, VerifyResult};

use super::config::AccountServiceConfig;
use super::password::validate_password_strength;
use super::types::AccountActionResult;

/// Account service for email confirmation and password reset
pub struct AccountService<U: UserRepository, M: MailServiceTrait> {
    /// User repository for database operations
    user_repository: Arc<U>,
    /// OTP service for issuing and checking codes
    otp_service: Arc<OtpService<M>>,
    /// Service configuration
    config: AccountServiceConfig,
}

impl<U: UserRepository, M: MailServiceTrait> AccountService<U, M> {
    /// Create a new account service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `otp_service` - Service issuing and verifying codes
    /// * `config` - Service configuration
    pub fn new(
        user_repository: Arc<U>,
        otp_service: Arc<OtpService<M>>,
        config: AccountServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            otp_service,
            config,
        }
    }

    /// Email a verification code to a registered, unverified user
    ///
    /// # Returns
    ///
    /// * `Ok(AccountActionResult)` - Delivery outcome
    /// * `Err(DomainError)` - Unknown user, already verified, or system failure
    pub async fn request_email_verification(&self, email: &str) -> DomainResult<AccountActionResult> {
        let user = self.find_user(email).await?;
        if user.email_verified {
            return Err(DomainError::BusinessRule {
                message: "Email address is already verified".to_string(),
            });
        }

        let issued = self
            .otp_service
            .send_otp(Self::recipient(&user), Purpose::EmailVerify, None)
            .await?;
        Ok(AccountActionResult::from(&issued))
    }

    /// Confirm an email address with a code from [`Self::request_email_verification`]
    pub async fn confirm_email(&self, token: &str, code: &str) -> DomainResult<AccountActionResult> {
        let verified = self
            .otp_service
            .verify_for(token, code, Purpose::EmailVerify)
            .await?;
        let (identity, token_id) = match Self::accepted_identity(verified) {
            Ok(accepted) => accepted,
            Err(rejected) => return Ok(rejected),
        };

        let marked = match self.user_repository.mark_email_verified(&identity).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(DomainError::NotFound {
                resource: "User".to_string(),
            }),
            Err(e) => Err(e),
        };
        if let Err(e) = marked {
            self.release_after_failure(token_id.as_deref()).await;
            return Err(e);
        }

        tracing::info!(
            email = %mask_email(&identity),
            event = "email_verified",
            "User email address verified"
        );
        Ok(AccountActionResult::succeeded("Email verified successfully"))
    }

    /// Email a password reset code to a registered user
    pub async fn request_password_reset(&self, email: &str) -> DomainResult<AccountActionResult> {
        let user = self.find_user(email).await?;
        let issued = self
            .otp_service
            .send_otp(Self::recipient(&user), Purpose::PasswordReset, None)
            .await?;
        Ok(AccountActionResult::from(&issued))
    }

    /// Replace the password of the user a reset code was issued to
    ///
    /// The password strength check runs first so a weak password never
    /// consumes a single-use token. A failed write releases the token again.
    pub async fn reset_password(
        &self,
        token: &str,
        code: &str,
        new_password: &str,
    ) -> DomainResult<AccountActionResult> {
        validate_password_strength(new_password)?;

        let verified = self
            .otp_service
            .verify_for(token, code, Purpose::PasswordReset)
            .await?;
        let (identity, token_id) = match Self::accepted_identity(verified) {
            Ok(accepted) => accepted,
            Err(rejected) => return Ok(rejected),
        };

        if let Err(e) = self.store_password(&identity, new_password).await {
            self.release_after_failure(token_id.as_deref()).await;
            return Err(e);
        }

        tracing::info!(
            email = %mask_email(&identity),
            event = "password_reset",
            "User password reset"
        );
        Ok(AccountActionResult::succeeded("Password reset successfully"))
    }

    async fn find_user(&self, email: &str) -> DomainResult<UserRecord> {
        let email = normalize_email(email);
        self.user_repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                tracing::info!(
                    email = %mask_email(&email),
                    event = "account_user_not_found",
                    "Account action requested for unknown email"
                );
                DomainError::NotFound {
                    resource: "User".to_string(),
                }
            })
    }

    fn recipient(user: &UserRecord) -> OtpRecipient {
        let name = user.full_name();
        let name = if name.is_empty() { user.username.clone() } else { name };
        OtpRecipient::new(user.email.clone(), name)
    }

    async fn store_password(&self, identity: &str, new_password: &str) -> DomainResult<()> {
        let password_hash = self.hash_password(new_password).await?;
        if !self
            .user_repository
            .update_password(identity, &password_hash)
            .await?
        {
            return Err(DomainError::NotFound {
                resource: "User".to_string(),
            });
        }
        Ok(())
    }

    /// Give a consumed token back after the follow-up write failed
    async fn release_after_failure(&self, token_id: Option<&str>) {
        if let Some(token_id) = token_id {
            if let Err(e) = self.otp_service.release(token_id).await {
                tracing::warn!(
                    error = %e,
                    event = "otp_release_failed",
                    "Verification token stays consumed after a failed update"
                );
            }
        }
    }

    fn accepted_identity(
        verified: VerifyResult,
    ) -> Result<(String, Option<String>), AccountActionResult> {
        match (verified.success, verified.identity, verified.reason) {
            (true, Some(identity), _) => Ok((identity, verified.token_id)),
            (_, _, Some(reason)) => Err(AccountActionResult::rejected(reason)),
            _ => Err(AccountActionResult::rejected(
                crate::services::otp::VerifyFailure::Malformed,
            )),
        }
    }

    async fn hash_password(&self, password: &str) -> DomainResult<String> {
        let password = password.to_string();
        let cost = self.config.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Password hashing task failed: {}", e),
            })?
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to hash password: {}", e),
            })
    }
}
