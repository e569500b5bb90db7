//! Mail Service Module
//!
//! This module provides email transports for delivering one-time passcodes
//! and other account messages.
//!
//! ## Features
//!
//! - **Mail Service Trait**: Common interface for all transports
//! - **Mock Implementation**: Console output for development
//! - **SMTP Support**: Production delivery via lettre's async transport
//! - **Templates**: Text and HTML bodies rendered from the OTP envelope
//! - **Security**: Recipient masking in logs

pub mod mail_service;
pub mod mail_trait_adapter;
pub mod mock_mail;
pub mod smtp;
pub mod templates;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use mail_service::MailService;
pub use mail_trait_adapter::MailServiceAdapter;
pub use mock_mail::MockMailService;
pub use smtp::SmtpMailService;

use crate::config::{MailConfig, MailProvider};
use crate::InfrastructureError;

/// Create a mail service based on configuration
///
/// # Errors
///
/// Returns `InfrastructureError::Config` when the SMTP transport cannot be
/// initialized. There is no fallback: a transport that cannot send must not
/// report success.
pub fn create_mail_service(config: &MailConfig) -> Result<Box<dyn MailService>, InfrastructureError> {
    match config.provider {
        MailProvider::Mock => {
            tracing::warn!("Using mock mail service, messages will not be sent");
            Ok(Box::new(MockMailService::new()))
        }
        MailProvider::Smtp => {
            let service = SmtpMailService::new(config).map_err(|e| {
                tracing::error!(error = %e, "Failed to initialize SMTP mail service");
                e
            })?;
            Ok(Box::new(service))
        }
    }
}
