//! Mock Mail Service Implementation
//!
//! Records messages instead of sending them. Bodies, which carry the OTP
//! code and link, are only logged at debug level.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use mt_shared::utils::validation::mask_email;

use crate::InfrastructureError;
use super::mail_service::MailService;

/// Mock mail service for development and testing
#[derive(Clone)]
pub struct MockMailService {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
    /// Whether to print message bodies to the log
    console_output: bool,
}

impl MockMailService {
    /// Create a new mock mail service
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
            console_output: true,
        }
    }

    /// Create a mock service with configurable options
    pub fn with_options(console_output: bool, simulate_failure: bool) -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
            simulate_failure,
            console_output,
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for MockMailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MailService for MockMailService {
    async fn send_mail(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        _html_body: &str,
    ) -> Result<String, InfrastructureError> {
        if self.simulate_failure {
            warn!(to = %mask_email(to), "Simulated mail failure");
            return Err(InfrastructureError::Mail("Simulated mail failure".to_string()));
        }

        let message_id = format!("mock-{}", Uuid::new_v4());
        self.message_count.fetch_add(1, Ordering::SeqCst);

        info!(to = %mask_email(to), message_id = %message_id, "[MOCK MAIL] message not sent");
        if self.console_output {
            debug!(
                subject = subject,
                message_id = %message_id,
                body = text_body,
                "[MOCK MAIL] message body"
            );
        }

        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
