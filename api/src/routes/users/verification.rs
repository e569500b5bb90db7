use actix_web::{web, HttpResponse};
use validator::Validate;

use mt_core::repositories::UserRepository;
use mt_core::services::otp::MailServiceTrait;

use crate::app::AppState;
use crate::dto::users::{EmailRequest, TokenCodeRequest};
use crate::handlers::{handle_domain_error, validation_error_response};

use super::{issued_response, verified_response};

/// Handler for POST /api/v1/users/request-verification
///
/// Emails an email-verification code to a registered user.
///
/// - 404 when no user has this email
/// - 409 when the email is already verified
/// - 502 when the mail transport fails
pub async fn request_verification<U, M>(
    state: web::Data<AppState<U, M>>,
    request: web::Json<EmailRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MailServiceTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    match state
        .account_service
        .request_email_verification(&request.email)
        .await
    {
        Ok(result) => issued_response(result),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/users/verify-email
pub async fn verify_email<U, M>(
    state: web::Data<AppState<U, M>>,
    request: web::Json<TokenCodeRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MailServiceTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    match state
        .account_service
        .confirm_email(&request.token, &request.code)
        .await
    {
        Ok(result) => verified_response(result),
        Err(error) => handle_domain_error(error),
    }
}
