//! SMTP Mail Service Implementation
//!
//! Delivers mail through an SMTP relay with STARTTLS using lettre's async
//! tokio transport, so concurrent sends do not block the runtime.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;
use tracing::{error, info};

use mt_shared::utils::validation::mask_email;

use crate::config::MailConfig;
use crate::InfrastructureError;
use super::mail_service::MailService;

/// SMTP mail service
pub struct SmtpMailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    host: String,
}

impl SmtpMailService {
    /// Create a new SMTP mail service
    ///
    /// # Errors
    ///
    /// Returns `InfrastructureError::Config` when the relay host or sender
    /// address cannot be used.
    pub fn new(config: &MailConfig) -> Result<Self, InfrastructureError> {
        let sender: Mailbox = config
            .sender()
            .parse()
            .map_err(|e| InfrastructureError::Config(format!("Invalid sender address: {}", e)))?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| InfrastructureError::Config(format!("Failed to create SMTP relay: {}", e)))?
            .port(config.smtp_port)
            .timeout(Some(Duration::from_secs(config.timeout_secs)));

        if !config.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ));
        }

        info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            "SMTP mail service initialized"
        );

        Ok(Self {
            transport: builder.build(),
            sender,
            host: config.smtp_host.clone(),
        })
    }

    /// Build the multipart message
    fn build_message(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<Message, InfrastructureError> {
        let recipient: Mailbox = to
            .parse()
            .map_err(|e| InfrastructureError::Mail(format!("Invalid recipient: {}", e)))?;

        Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )
            .map_err(|e| InfrastructureError::Mail(format!("Failed to build message: {}", e)))
    }
}

#[async_trait]
impl MailService for SmtpMailService {
    async fn send_mail(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<String, InfrastructureError> {
        let message = self.build_message(to, subject, text_body, html_body)?;

        match self.transport.send(message).await {
            Ok(response) => {
                let message_id = response
                    .message()
                    .next()
                    .map(str::to_string)
                    .unwrap_or_else(|| response.code().to_string());
                info!(
                    to = %mask_email(to),
                    message_id = %message_id,
                    "Email sent successfully"
                );
                Ok(message_id)
            }
            Err(e) => {
                error!(
                    to = %mask_email(to),
                    host = %self.host,
                    error = %e,
                    "Failed to send email"
                );
                Err(InfrastructureError::Mail(e.to_string()))
            }
        }
    }

    fn provider_name(&self) -> &str {
        "SMTP"
    }

    async fn is_available(&self) -> bool {
        self.transport.test_connection().await.unwrap_or(false)
    }
}
