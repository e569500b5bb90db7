//! Email body templates for OTP messages
//!
//! Rendered with askama from `infra/templates/`. The HTML template is
//! escaped automatically; the text template is not.

use askama::Template;

use mt_core::domain::entities::envelope::EmailBody;

use crate::InfrastructureError;

#[derive(Template)]
#[template(path = "otp_email.txt")]
struct OtpTextTemplate<'a> {
    body: &'a EmailBody,
}

#[derive(Template)]
#[template(path = "otp_email.html")]
struct OtpHtmlTemplate<'a> {
    body: &'a EmailBody,
}

/// Plain text body
pub fn render_text(body: &EmailBody) -> Result<String, InfrastructureError> {
    OtpTextTemplate { body }
        .render()
        .map_err(|e| InfrastructureError::Mail(format!("Failed to render text body: {}", e)))
}

/// HTML body
pub fn render_html(body: &EmailBody) -> Result<String, InfrastructureError> {
    OtpHtmlTemplate { body }
        .render()
        .map_err(|e| InfrastructureError::Mail(format!("Failed to render HTML body: {}", e)))
}
