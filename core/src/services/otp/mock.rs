//! Mock implementations for testing the OTP service

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::domain::entities::envelope::DeliveryEnvelope;
use crate::domain::entities::otp_code::OtpCode;
use crate::errors::OtpError;

use super::code_generator::CodeGenerator;
use super::traits::MailServiceTrait;

/// Mail transport that records envelopes instead of sending them
#[derive(Default)]
pub struct MockMailService {
    pub sent: Arc<Mutex<Vec<DeliveryEnvelope>>>,
    pub should_fail: bool,
    /// Artificial latency before responding
    pub delay: Option<Duration>,
}

impl MockMailService {
    pub fn new(should_fail: bool) -> Self {
        Self {
            should_fail,
            ..Default::default()
        }
    }

    /// Transport that answers only after `delay`
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Default::default()
        }
    }

    /// All envelopes handed to the transport so far
    pub fn sent_envelopes(&self) -> Vec<DeliveryEnvelope> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    /// Code from the most recent envelope sent to `email`
    pub fn last_code_for(&self, email: &str) -> Option<String> {
        self.sent_envelopes()
            .into_iter()
            .rev()
            .find(|envelope| envelope.recipients.iter().any(|r| r == email))
            .map(|envelope| envelope.body.otp_code)
    }
}

#[async_trait]
impl MailServiceTrait for MockMailService {
    async fn send(&self, envelope: &DeliveryEnvelope) -> Result<String, String> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.should_fail {
            return Err("Mail service error".to_string());
        }
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(envelope.clone());
        }
        Ok(format!("mock-mail-{}", uuid::Uuid::new_v4()))
    }
}

/// Code generator returning a pinned value
pub struct FixedCodeGenerator {
    value: AtomicU32,
}

impl FixedCodeGenerator {
    pub fn new(value: u32) -> Self {
        Self {
            value: AtomicU32::new(value),
        }
    }

    /// Change the value returned by later calls
    pub fn set(&self, value: u32) {
        self.value.store(value, Ordering::SeqCst);
    }
}

impl CodeGenerator for FixedCodeGenerator {
    fn generate(&self) -> Result<OtpCode, OtpError> {
        OtpCode::from_value(self.value.load(Ordering::SeqCst)).map_err(|_| OtpError::EntropyUnavailable)
    }
}

/// Code generator whose entropy source always fails
pub struct FailingCodeGenerator;

impl CodeGenerator for FailingCodeGenerator {
    fn generate(&self) -> Result<OtpCode, OtpError> {
        Err(OtpError::EntropyUnavailable)
    }
}
