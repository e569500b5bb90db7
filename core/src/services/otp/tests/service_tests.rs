use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};

use crate::domain::entities::purpose::Purpose;
use crate::errors::{DomainError, OtpError};
use crate::services::otp::mock::{FailingCodeGenerator, MockMailService};
use crate::services::otp::{
    InMemoryReplayGuard, OtpRecipient, OtpService, VerifyFailure, DELIVERY_FAILED_DETAIL,
    DELIVERY_SUCCESS_DETAIL,
};

use super::{service_with, test_codec, test_config};

#[tokio::test]
async fn test_issue_success() {
    let mail = Arc::new(MockMailService::new(false));
    let service = service_with(mail.clone(), 482_913);

    let result = service
        .issue("a@x.com", Purpose::EmailVerify, Duration::minutes(10))
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(result.detail, DELIVERY_SUCCESS_DETAIL);
    assert_eq!(result.code.as_ref().map(|c| c.as_str()), Some("482913"));
    assert!(result.message_id.unwrap().starts_with("mock-mail-"));
    assert!(result.expires_at > Utc::now());

    // Trailing slash on the base URL is trimmed
    let expected_prefix = "https://admin.example.com/email-verify/";
    assert!(result.url.starts_with(expected_prefix));
    assert_eq!(&result.url[expected_prefix.len()..], result.token);

    let sent = mail.sent_envelopes();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipients, vec!["a@x.com".to_string()]);
    assert_eq!(sent[0].subject, Purpose::EmailVerify.default_subject());
    assert_eq!(sent[0].body.otp_code, "482913");
    assert_eq!(sent[0].body.url, result.url);
    assert_eq!(sent[0].body.email_purpose, "email verify");
    assert_eq!(sent[0].body.company_name, "Acme");
    assert_eq!(sent[0].body.user_name, "a");
}

#[tokio::test]
async fn test_issue_normalizes_identity() {
    let mail = Arc::new(MockMailService::new(false));
    let service = service_with(mail.clone(), 123_456);

    let result = service
        .issue_with(
            OtpRecipient::new("  Jane.Doe@Example.COM ", "Jane Doe"),
            Purpose::PasswordReset,
            Duration::minutes(10),
            Some("Custom subject".to_string()),
        )
        .await
        .unwrap();

    let sent = mail.sent_envelopes();
    assert_eq!(sent[0].recipients, vec!["jane.doe@example.com".to_string()]);
    assert_eq!(sent[0].subject, "Custom subject");
    assert_eq!(sent[0].body.user_name, "Jane Doe");

    let verified = service.verify(&result.token, "123456").await.unwrap();
    assert_eq!(verified.identity.as_deref(), Some("jane.doe@example.com"));
    assert!(result.url.contains("/password-reset/"));
}

#[tokio::test]
async fn test_issue_rejects_invalid_email() {
    let mail = Arc::new(MockMailService::new(false));
    let service = service_with(mail.clone(), 123_456);

    for bad in ["", "not-an-email", "missing@tld", "@x.com"] {
        let result = service
            .issue(bad, Purpose::EmailVerify, Duration::minutes(10))
            .await;
        assert!(
            matches!(result, Err(DomainError::Validation { .. })),
            "expected {:?} to be rejected",
            bad
        );
    }
    assert!(mail.sent_envelopes().is_empty());
}

#[tokio::test]
async fn test_issue_delivery_failure_is_not_an_error() {
    let mail = Arc::new(MockMailService::new(true));
    let service = service_with(mail, 123_456);

    let result = service
        .issue("a@x.com", Purpose::EmailVerify, Duration::minutes(10))
        .await
        .unwrap();

    assert!(!result.success);
    assert!(result.code.is_none());
    assert!(result.message_id.is_none());
    assert_eq!(result.detail, DELIVERY_FAILED_DETAIL);
    assert!(!result.token.is_empty());
}

#[tokio::test]
async fn test_issue_delivery_timeout() {
    let mail = Arc::new(MockMailService::with_delay(StdDuration::from_secs(5)));
    let service = service_with(mail.clone(), 123_456);

    let started = std::time::Instant::now();
    let result = service
        .issue("a@x.com", Purpose::EmailVerify, Duration::minutes(10))
        .await
        .unwrap();

    assert!(!result.success);
    assert_eq!(result.detail, DELIVERY_FAILED_DETAIL);
    assert!(started.elapsed() < StdDuration::from_secs(4));
    assert!(mail.sent_envelopes().is_empty());
}

#[tokio::test]
async fn test_issue_entropy_failure_is_fatal() {
    let mail = Arc::new(MockMailService::new(false));
    let service = OtpService::new(mail.clone(), test_codec(), test_config())
        .with_code_generator(Arc::new(FailingCodeGenerator));

    let err = service
        .issue("a@x.com", Purpose::EmailVerify, Duration::minutes(10))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::Otp(OtpError::EntropyUnavailable)));
    assert!(err.is_fatal());
    assert!(mail.sent_envelopes().is_empty());
}

#[tokio::test]
async fn test_send_otp_uses_default_ttl() {
    let mail = Arc::new(MockMailService::new(false));
    let service = service_with(mail, 123_456);

    let before = Utc::now();
    let result = service
        .send_otp(OtpRecipient::new("a@x.com", "A"), Purpose::EmailVerify, None)
        .await
        .unwrap();

    let lifetime = result.expires_at - before;
    assert!(lifetime <= Duration::minutes(10) + Duration::seconds(1));
    assert!(lifetime >= Duration::minutes(10) - Duration::seconds(2));
}

#[tokio::test]
async fn test_verify_success() {
    let mail = Arc::new(MockMailService::new(false));
    let service = service_with(mail, 482_913);

    let issued = service
        .issue("a@x.com", Purpose::EmailVerify, Duration::minutes(10))
        .await
        .unwrap();
    let result = service.verify(&issued.token, "482913").await.unwrap();

    assert!(result.success);
    assert_eq!(result.identity.as_deref(), Some("a@x.com"));
    assert_eq!(result.purpose, Some(Purpose::EmailVerify));
    assert!(result.reason.is_none());

    // Without a replay guard the token stays valid until expiry
    assert!(service.verify(&issued.token, "482913").await.unwrap().success);
}

#[tokio::test]
async fn test_verify_wrong_code() {
    let mail = Arc::new(MockMailService::new(false));
    let service = service_with(mail, 482_913);

    let issued = service
        .issue("a@x.com", Purpose::EmailVerify, Duration::minutes(10))
        .await
        .unwrap();

    for wrong in ["000000", "48291", "4829130", "", "abcdef"] {
        let result = service.verify(&issued.token, wrong).await.unwrap();
        assert!(!result.success);
        assert_eq!(result.reason, Some(VerifyFailure::CodeMismatch));
        assert!(result.identity.is_none());
    }
}

#[tokio::test]
async fn test_verify_expired() {
    let mail = Arc::new(MockMailService::new(false));
    let service = service_with(mail, 482_913);

    let issued = service
        .issue("a@x.com", Purpose::EmailVerify, Duration::seconds(1))
        .await
        .unwrap();
    tokio::time::sleep(StdDuration::from_millis(2_100)).await;

    let result = service.verify(&issued.token, "482913").await.unwrap();
    assert_eq!(result.reason, Some(VerifyFailure::Expired));
}

#[tokio::test]
async fn test_verify_token_from_other_key() {
    let mail = Arc::new(MockMailService::new(false));
    let service = service_with(mail.clone(), 482_913);

    let issued = service
        .issue("a@x.com", Purpose::EmailVerify, Duration::minutes(10))
        .await
        .unwrap();

    let other_codec = Arc::new(
        crate::services::otp::OtpTokenCodec::new("a-different-secret", jsonwebtoken::Algorithm::HS256)
            .unwrap(),
    );
    let other = OtpService::new(mail, other_codec, test_config());

    let result = other.verify(&issued.token, "482913").await.unwrap();
    assert_eq!(result.reason, Some(VerifyFailure::InvalidSignature));
}

#[tokio::test]
async fn test_verify_malformed() {
    let mail = Arc::new(MockMailService::new(false));
    let service = service_with(mail, 482_913);

    let result = service.verify("garbage", "482913").await.unwrap();
    assert_eq!(result.reason, Some(VerifyFailure::Malformed));
}

#[tokio::test]
async fn test_verify_for_checks_purpose_after_code() {
    let mail = Arc::new(MockMailService::new(false));
    let service = service_with(mail, 482_913);

    let issued = service
        .issue("a@x.com", Purpose::EmailVerify, Duration::minutes(10))
        .await
        .unwrap();

    let wrong_code = service
        .verify_for(&issued.token, "000000", Purpose::PasswordReset)
        .await
        .unwrap();
    assert_eq!(wrong_code.reason, Some(VerifyFailure::CodeMismatch));

    let wrong_purpose = service
        .verify_for(&issued.token, "482913", Purpose::PasswordReset)
        .await
        .unwrap();
    assert_eq!(wrong_purpose.reason, Some(VerifyFailure::PurposeMismatch));

    let ok = service
        .verify_for(&issued.token, "482913", Purpose::EmailVerify)
        .await
        .unwrap();
    assert!(ok.success);
}

#[tokio::test]
async fn test_replay_guard_rejects_second_use() {
    let mail = Arc::new(MockMailService::new(false));
    let service = service_with(mail, 482_913).with_replay_guard(Arc::new(InMemoryReplayGuard::new()));
    assert!(service.is_single_use());

    let issued = service
        .issue("a@x.com", Purpose::PasswordReset, Duration::minutes(10))
        .await
        .unwrap();

    // A wrong code does not consume the token
    let wrong = service.verify(&issued.token, "111111").await.unwrap();
    assert_eq!(wrong.reason, Some(VerifyFailure::CodeMismatch));

    assert!(service.verify(&issued.token, "482913").await.unwrap().success);

    let replay = service.verify(&issued.token, "482913").await.unwrap();
    assert_eq!(replay.reason, Some(VerifyFailure::AlreadyUsed));
}

#[tokio::test]
async fn test_single_use_token_rejected_after_expiry_instant() {
    let mail = Arc::new(MockMailService::new(false));
    let service = service_with(mail, 482_913).with_replay_guard(Arc::new(InMemoryReplayGuard::new()));

    let issued = service
        .issue("a@x.com", Purpose::EmailVerify, Duration::seconds(2))
        .await
        .unwrap();
    assert!(service.verify(&issued.token, "482913").await.unwrap().success);

    let wait = (issued.expires_at + Duration::milliseconds(300) - Utc::now())
        .to_std()
        .unwrap_or_default();
    tokio::time::sleep(wait).await;

    let late = service.verify(&issued.token, "482913").await.unwrap();
    assert!(!late.success);
    assert_eq!(late.reason, Some(VerifyFailure::Expired));
}

#[tokio::test]
async fn test_issue_out_of_range_ttl_is_fatal() {
    let mail = Arc::new(MockMailService::new(false));
    let service = service_with(mail.clone(), 482_913);

    let result = service
        .issue("a@x.com", Purpose::EmailVerify, Duration::weeks(20_000_000))
        .await;

    assert!(matches!(result, Err(DomainError::Otp(OtpError::Encoding { .. }))));
    assert!(mail.sent_envelopes().is_empty());
}

#[tokio::test]
async fn test_send_otp_with_oversized_default_ttl_is_fatal() {
    let mail = Arc::new(MockMailService::new(false));
    let mut config = test_config();
    config.default_ttl_minutes = i64::MAX;
    let service = OtpService::new(mail.clone(), test_codec(), config);

    let result = service
        .send_otp(OtpRecipient::new("a@x.com", "A"), Purpose::EmailVerify, None)
        .await;

    assert!(matches!(result, Err(DomainError::Otp(OtpError::Encoding { .. }))));
    assert!(mail.sent_envelopes().is_empty());
}

#[tokio::test]
async fn test_replay_guard_failure_is_fatal() {
    use async_trait::async_trait;
    use chrono::DateTime;

    struct BrokenGuard;

    #[async_trait]
    impl crate::services::otp::ReplayGuardTrait for BrokenGuard {
        async fn consume(&self, _jti: &str, _expires_at: DateTime<Utc>) -> Result<bool, String> {
            Err("store offline".to_string())
        }

        async fn release(&self, _jti: &str) -> Result<(), String> {
            Err("store offline".to_string())
        }
    }

    let mail = Arc::new(MockMailService::new(false));
    let service = service_with(mail, 482_913).with_replay_guard(Arc::new(BrokenGuard));

    let issued = service
        .issue("a@x.com", Purpose::EmailVerify, Duration::minutes(10))
        .await
        .unwrap();
    let err = service.verify(&issued.token, "482913").await.unwrap_err();
    assert!(matches!(err, DomainError::Internal { .. }));
    assert!(matches!(
        service.release("any-id").await,
        Err(DomainError::Internal { .. })
    ));
}

#[tokio::test]
async fn test_released_token_verifies_again() {
    let mail = Arc::new(MockMailService::new(false));
    let service = service_with(mail, 482_913).with_replay_guard(Arc::new(InMemoryReplayGuard::new()));

    let issued = service
        .issue("a@x.com", Purpose::PasswordReset, Duration::minutes(10))
        .await
        .unwrap();

    let first = service.verify(&issued.token, "482913").await.unwrap();
    let token_id = first.token_id.clone().unwrap();
    assert!(!token_id.is_empty());

    service.release(&token_id).await.unwrap();
    assert!(service.verify(&issued.token, "482913").await.unwrap().success);
    assert_eq!(
        service.verify(&issued.token, "482913").await.unwrap().reason,
        Some(VerifyFailure::AlreadyUsed)
    );
}

#[tokio::test]
async fn test_release_without_guard_is_noop() {
    let mail = Arc::new(MockMailService::new(false));
    let service = service_with(mail, 482_913);
    assert!(service.release("unknown").await.is_ok());
}

#[tokio::test]
async fn test_concurrent_issuance() {
    let mail = Arc::new(MockMailService::new(false));
    let service = Arc::new(OtpService::new(mail.clone(), test_codec(), test_config()));

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .issue(&format!("user{}@x.com", i), Purpose::EmailVerify, Duration::minutes(10))
                    .await
            })
        })
        .collect();

    for handle in handles {
        let issued = handle.await.unwrap().unwrap();
        let code = issued.code.unwrap();
        assert!(service.verify(&issued.token, code.as_str()).await.unwrap().success);
    }
    assert_eq!(mail.sent_envelopes().len(), 20);
}
