//! Mail Service Trait Adapter
//!
//! Implements the core `MailServiceTrait` on top of any infrastructure
//! `MailService`, rendering the envelope into text and HTML bodies.

use async_trait::async_trait;
use mt_core::domain::entities::envelope::DeliveryEnvelope;
use mt_core::services::otp::MailServiceTrait;

use super::mail_service::MailService;
use super::templates::{render_html, render_text};

/// Adapter that implements the core MailServiceTrait for a mail transport
pub struct MailServiceAdapter {
    inner: Box<dyn MailService>,
}

impl MailServiceAdapter {
    /// Wrap a transport
    pub fn new(inner: Box<dyn MailService>) -> Self {
        Self { inner }
    }

    /// Name of the wrapped transport
    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl MailServiceTrait for MailServiceAdapter {
    async fn send(&self, envelope: &DeliveryEnvelope) -> Result<String, String> {
        let text = render_text(&envelope.body).map_err(|e| e.to_string())?;
        let html = render_html(&envelope.body).map_err(|e| e.to_string())?;

        let mut message_ids = Vec::with_capacity(envelope.recipients.len());
        for recipient in &envelope.recipients {
            let id = self
                .inner
                .send_mail(recipient, &envelope.subject, &text, &html)
                .await
                .map_err(|e| e.to_string())?;
            message_ids.push(id);
        }

        if message_ids.is_empty() {
            return Err("Envelope has no recipients".to_string());
        }
        Ok(message_ids.join(","))
    }
}
