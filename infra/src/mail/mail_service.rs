//! Mail Service Interface
//!
//! Defines the trait for email transports that deliver verification codes
//! and other account messages.

use async_trait::async_trait;

use crate::InfrastructureError;

/// Mail service trait for sending email messages
///
/// Implementations include:
/// - SMTP relay (lettre)
/// - Mock implementation for development
#[async_trait]
pub trait MailService: Send + Sync {
    /// Send a multipart (text + HTML) email
    ///
    /// # Arguments
    ///
    /// * `to` - Recipient address
    /// * `subject` - Subject line
    /// * `text_body` - Plain text alternative
    /// * `html_body` - HTML alternative
    ///
    /// # Returns
    ///
    /// * `Ok(message_id)` - Identifier for the sent message
    /// * `Err(InfrastructureError)` - If sending fails
    async fn send_mail(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<String, InfrastructureError>;

    /// Get the transport name (e.g. "SMTP", "Mock")
    fn provider_name(&self) -> &str;

    /// Check if the transport is reachable
    ///
    /// Default implementation always returns true.
    async fn is_available(&self) -> bool {
        true
    }
}
