//! Shared fixtures for API integration tests

#![allow(dead_code)]

use std::sync::Arc;

use actix_web::web;

use mt_api::AppState;
use mt_core::domain::entities::user::UserRecord;
use mt_core::repositories::MockUserRepository;
use mt_core::services::account::{AccountService, AccountServiceConfig};
use mt_core::services::otp::mock::{FixedCodeGenerator, MockMailService};
use mt_core::services::otp::{InMemoryReplayGuard, OtpService, OtpServiceConfig, OtpTokenCodec};
use mt_shared::config::{CorsConfig, OtpConfig};

pub const TEST_CODE: u32 = 135_790;
pub const TEST_CODE_STR: &str = "135790";
pub const MAX_PAYLOAD: usize = 64 * 1024;

pub type TestState = AppState<MockUserRepository, MockMailService>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub otp_service: Arc<OtpService<MockMailService>>,
    pub mail: Arc<MockMailService>,
    pub users: Arc<MockUserRepository>,
}

#[derive(Default)]
pub struct ContextOptions {
    pub expose_code: bool,
    pub mail_fails: bool,
    pub single_use: bool,
}

pub fn otp_config() -> OtpConfig {
    OtpConfig::new("api-integration-test-secret").with_base_url("https://admin.example.com")
}

pub fn cors() -> CorsConfig {
    CorsConfig::development()
}

pub fn context(options: ContextOptions) -> TestContext {
    let config = otp_config();
    let mail = Arc::new(MockMailService::new(options.mail_fails));
    let users = Arc::new(MockUserRepository::new());
    let codec = Arc::new(OtpTokenCodec::from_config(&config).unwrap());

    let mut otp_service = OtpService::new(mail.clone(), codec, OtpServiceConfig::from(&config))
        .with_code_generator(Arc::new(FixedCodeGenerator::new(TEST_CODE)));
    if options.single_use {
        otp_service = otp_service.with_replay_guard(Arc::new(InMemoryReplayGuard::new()));
    }
    let otp_service = Arc::new(otp_service);

    let account_service = Arc::new(AccountService::new(
        users.clone(),
        otp_service.clone(),
        AccountServiceConfig { bcrypt_cost: 4 },
    ));

    TestContext {
        state: web::Data::new(AppState::new(
            otp_service.clone(),
            account_service,
            options.expose_code,
        )),
        otp_service,
        mail,
        users,
    }
}

/// Token from the verification link of the last email sent
pub fn last_token(mail: &MockMailService) -> String {
    let envelope = mail.sent_envelopes().pop().expect("an email was sent");
    envelope
        .body
        .url
        .rsplit('/')
        .next()
        .expect("url has a token segment")
        .to_string()
}

pub fn unverified_user(email: &str) -> UserRecord {
    let hash = bcrypt::hash("Original#Pass1", 4).unwrap();
    UserRecord::new(email, "jdoe", "Jane", "Doe", hash)
}
