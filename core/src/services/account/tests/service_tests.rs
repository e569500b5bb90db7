use std::sync::Arc;

use crate::domain::entities::user::UserRecord;
use crate::errors::{DomainError, ValidationError};
use crate::repositories::MockUserRepository;
use crate::services::account::{AccountService, AccountServiceConfig};
use crate::services::otp::mock::{FixedCodeGenerator, MockMailService};
use crate::services::otp::{
    InMemoryReplayGuard, OtpService, OtpServiceConfig, OtpTokenCodec, VerifyFailure,
};

struct Fixture {
    service: AccountService<MockUserRepository, MockMailService>,
    users: Arc<MockUserRepository>,
    mail: Arc<MockMailService>,
}

async fn fixture() -> Fixture {
    let users = Arc::new(MockUserRepository::new());
    users
        .insert(UserRecord::new("jane@example.com", "jane", "Jane", "Doe", "old-hash"))
        .await;

    let mail = Arc::new(MockMailService::new(false));
    let codec = Arc::new(OtpTokenCodec::new("account-test-secret", jsonwebtoken::Algorithm::HS256).unwrap());
    let otp = OtpService::new(mail.clone(), codec, OtpServiceConfig::default())
        .with_code_generator(Arc::new(FixedCodeGenerator::new(246_810)))
        .with_replay_guard(Arc::new(InMemoryReplayGuard::new()));

    let service = AccountService::new(
        users.clone(),
        Arc::new(otp),
        AccountServiceConfig { bcrypt_cost: 4 },
    );
    Fixture { service, users, mail }
}

/// Token is the last path segment of the emailed link
fn last_token(mail: &MockMailService) -> String {
    let envelope = mail.sent_envelopes().pop().unwrap();
    envelope.body.url.rsplit('/').next().unwrap().to_string()
}

#[tokio::test]
async fn test_email_verification_flow() {
    let f = fixture().await;

    let requested = f
        .service
        .request_email_verification("  Jane@Example.com ")
        .await
        .unwrap();
    assert!(requested.success);

    let envelope = f.mail.sent_envelopes().pop().unwrap();
    assert_eq!(envelope.body.user_name, "Jane Doe");
    assert!(envelope.body.url.contains("/email-verify/"));

    let token = last_token(&f.mail);
    let confirmed = f.service.confirm_email(&token, "246810").await.unwrap();
    assert!(confirmed.success);
    assert!(f.users.get("jane@example.com").await.unwrap().email_verified);

    // Verified users cannot request another code
    let again = f.service.request_email_verification("jane@example.com").await;
    assert!(matches!(again, Err(DomainError::BusinessRule { .. })));
}

#[tokio::test]
async fn test_confirm_email_wrong_code_leaves_user_unverified() {
    let f = fixture().await;
    f.service
        .request_email_verification("jane@example.com")
        .await
        .unwrap();

    let token = last_token(&f.mail);
    let result = f.service.confirm_email(&token, "000000").await.unwrap();
    assert!(!result.success);
    assert_eq!(result.reason, Some(VerifyFailure::CodeMismatch));
    assert!(!f.users.get("jane@example.com").await.unwrap().email_verified);
}

#[tokio::test]
async fn test_unknown_user() {
    let f = fixture().await;
    assert!(matches!(
        f.service.request_email_verification("nobody@example.com").await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        f.service.request_password_reset("nobody@example.com").await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(f.mail.sent_envelopes().is_empty());
}

#[tokio::test]
async fn test_password_reset_flow() {
    let f = fixture().await;

    let requested = f.service.request_password_reset("jane@example.com").await.unwrap();
    assert!(requested.success);
    let token = last_token(&f.mail);

    let result = f
        .service
        .reset_password(&token, "246810", "n3w-password")
        .await
        .unwrap();
    assert!(result.success);

    let stored = f.users.get("jane@example.com").await.unwrap();
    assert!(bcrypt::verify("n3w-password", &stored.password_hash).unwrap());

    // Single use
    let replay = f
        .service
        .reset_password(&token, "246810", "an0ther-password")
        .await
        .unwrap();
    assert_eq!(replay.reason, Some(VerifyFailure::AlreadyUsed));
}

#[tokio::test]
async fn test_failed_password_write_keeps_reset_link_usable() {
    let f = fixture().await;
    f.service.request_password_reset("jane@example.com").await.unwrap();
    let token = last_token(&f.mail);

    f.users.set_failing(true);
    let err = f
        .service
        .reset_password(&token, "246810", "n3w-password")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Internal { .. }));

    f.users.set_failing(false);
    let retried = f
        .service
        .reset_password(&token, "246810", "n3w-password")
        .await
        .unwrap();
    assert!(retried.success);

    let stored = f.users.get("jane@example.com").await.unwrap();
    assert!(bcrypt::verify("n3w-password", &stored.password_hash).unwrap());
}

#[tokio::test]
async fn test_failed_verification_write_keeps_link_usable() {
    let f = fixture().await;
    f.service.request_email_verification("jane@example.com").await.unwrap();
    let token = last_token(&f.mail);

    f.users.set_failing(true);
    assert!(f.service.confirm_email(&token, "246810").await.is_err());

    f.users.set_failing(false);
    assert!(f.service.confirm_email(&token, "246810").await.unwrap().success);
    assert!(f.users.get("jane@example.com").await.unwrap().email_verified);
}

#[tokio::test]
async fn test_reset_password_rejects_weak_password_before_verifying() {
    let f = fixture().await;
    f.service.request_password_reset("jane@example.com").await.unwrap();
    let token = last_token(&f.mail);

    let weak = f.service.reset_password(&token, "246810", "short").await;
    assert!(matches!(
        weak,
        Err(DomainError::ValidationErr(ValidationError::WeakPassword { .. }))
    ));

    // Token was not consumed by the rejected attempt
    let ok = f
        .service
        .reset_password(&token, "246810", "g00d-password")
        .await
        .unwrap();
    assert!(ok.success);
}

#[tokio::test]
async fn test_tokens_are_bound_to_their_action() {
    let f = fixture().await;
    f.service
        .request_email_verification("jane@example.com")
        .await
        .unwrap();
    let verify_token = last_token(&f.mail);

    let result = f
        .service
        .reset_password(&verify_token, "246810", "n3w-password")
        .await
        .unwrap();
    assert_eq!(result.reason, Some(VerifyFailure::PurposeMismatch));
    assert_eq!(
        f.users.get("jane@example.com").await.unwrap().password_hash,
        "old-hash"
    );
}

#[tokio::test]
async fn test_delivery_failure_reported() {
    let users = Arc::new(MockUserRepository::new());
    users
        .insert(UserRecord::new("jane@example.com", "jane", "Jane", "Doe", "old-hash"))
        .await;
    let mail = Arc::new(MockMailService::new(true));
    let codec = Arc::new(OtpTokenCodec::new("account-test-secret", jsonwebtoken::Algorithm::HS256).unwrap());
    let otp = OtpService::new(mail, codec, OtpServiceConfig::default());
    let service = AccountService::new(users, Arc::new(otp), AccountServiceConfig::default());

    let result = service.request_password_reset("jane@example.com").await.unwrap();
    assert!(!result.success);
    assert_eq!(result.detail, crate::services::otp::DELIVERY_FAILED_DETAIL);
}
