//! Unit tests for the OTP service

mod code_generator_tests;
mod service_tests;

use std::sync::Arc;

use super::mock::{FixedCodeGenerator, MockMailService};
use super::{OtpService, OtpServiceConfig, OtpTokenCodec};

pub(crate) const TEST_SECRET: &str = "unit-test-secret-key";

pub(crate) fn test_codec() -> Arc<OtpTokenCodec> {
    Arc::new(OtpTokenCodec::new(TEST_SECRET, jsonwebtoken::Algorithm::HS256).unwrap())
}

pub(crate) fn test_config() -> OtpServiceConfig {
    OtpServiceConfig {
        default_ttl_minutes: 10,
        base_url: "https://admin.example.com/".to_string(),
        company_name: "Acme".to_string(),
        delivery_timeout_secs: 1,
    }
}

pub(crate) fn service_with(mail: Arc<MockMailService>, code: u32) -> OtpService<MockMailService> {
    OtpService::new(mail, test_codec(), test_config())
        .with_code_generator(Arc::new(FixedCodeGenerator::new(code)))
}
