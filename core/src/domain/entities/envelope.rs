//! Outbound email message value objects.

use serde::{Deserialize, Serialize};

/// Template fields rendered into an OTP email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailBody {
    /// Link embedding the verification token
    pub url: String,
    /// The code itself, for manual entry
    pub otp_code: String,
    /// Addressee display name
    pub user_name: String,
    /// Purpose label shown to the reader
    pub email_purpose: String,
    /// Sending company name
    pub company_name: String,
    /// Client base URL
    pub base_url: String,
}

/// A message handed to the mail transport, discarded after sending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryEnvelope {
    /// Destination addresses
    pub recipients: Vec<String>,
    /// Subject line
    pub subject: String,
    /// Template fields
    pub body: EmailBody,
}

impl DeliveryEnvelope {
    /// Envelope addressed to a single recipient
    pub fn new(recipient: impl Into<String>, subject: impl Into<String>, body: EmailBody) -> Self {
        Self {
            recipients: vec![recipient.into()],
            subject: subject.into(),
            body,
        }
    }

    /// First recipient, used for logging
    pub fn primary_recipient(&self) -> Option<&str> {
        self.recipients.first().map(String::as_str)
    }
}
