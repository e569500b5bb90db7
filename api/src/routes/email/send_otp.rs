use actix_web::{web, HttpResponse};
use validator::Validate;

use mt_core::domain::entities::purpose::Purpose;
use mt_core::errors::DomainError;
use mt_core::repositories::UserRepository;
use mt_core::services::otp::{MailServiceTrait, OtpRecipient};
use mt_shared::utils::validation::mask_email;

use crate::app::AppState;
use crate::dto::email::{SendOtpRequest, SendOtpResponse};
use crate::handlers::{handle_domain_error, validation_error_response};

/// Handler for POST /api/v1/email/send-otp
///
/// Issues a code for the given purpose and emails it with a verification
/// link.
///
/// # Request Body
///
/// ```json
/// {
///     "email": "jane@example.com",
///     "user_name": "Jane Doe",
///     "email_purpose": "Email Verify",
///     "subject": "Verify your email address"
/// }
/// ```
///
/// # Responses
/// - 200 OK: `{"success": true, "detail": "..."}`
/// - 400 Bad Request: invalid email, unknown purpose or malformed body
/// - 502 Bad Gateway: the mail transport failed or timed out,
///   `{"success": false, "detail": "Email sending failed"}`
/// - 500 Internal Server Error: entropy or signing failure
pub async fn send_otp<U, M>(
    state: web::Data<AppState<U, M>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MailServiceTrait + 'static,
{
    if let Err(errors) = request.validate() {
        tracing::warn!("Validation failed for send_otp request: {}", errors);
        return validation_error_response(errors);
    }
    let request = request.into_inner();

    let purpose = match request.email_purpose.parse::<Purpose>() {
        Ok(purpose) => purpose,
        Err(e) => return handle_domain_error(DomainError::from(e)),
    };

    tracing::info!(
        email = %mask_email(&request.email),
        purpose = %purpose,
        "Processing send_otp request"
    );

    let recipient = OtpRecipient::new(request.email, request.user_name);
    let issued = match state
        .otp_service
        .send_otp(recipient, purpose, request.subject)
        .await
    {
        Ok(issued) => issued,
        Err(error) => return handle_domain_error(error),
    };

    let mut body = SendOtpResponse {
        success: issued.success,
        detail: issued.detail.clone(),
        otp_code: None,
        url: None,
        expires_at: None,
    };

    if !issued.success {
        return HttpResponse::BadGateway().json(body);
    }

    if state.expose_code_in_response {
        body.otp_code = issued.code.as_ref().map(|code| code.as_str().to_string());
        body.url = Some(issued.url);
        body.expires_at = Some(issued.expires_at);
    }

    HttpResponse::Ok().json(body)
}
