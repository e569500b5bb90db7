use actix_web::{web, HttpResponse};
use validator::Validate;

use mt_core::repositories::UserRepository;
use mt_core::services::otp::MailServiceTrait;

use crate::app::AppState;
use crate::dto::users::{EmailRequest, ResetPasswordRequest};
use crate::handlers::{handle_domain_error, validation_error_response};

use super::{issued_response, verified_response};

/// Handler for POST /api/v1/users/forgot-password
pub async fn forgot_password<U, M>(
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

    match state.account_service.request_password_reset(&request.email).await {
        Ok(result) => issued_response(result),
        Err(error) => handle_domain_error(error),
    }
}

/// Handler for POST /api/v1/users/reset-password
///
/// A weak password is rejected with 400 before the code is checked.
pub async fn reset_password<U, M>(
    state: web::Data<AppState<U, M>>,
    request: web::Json<ResetPasswordRequest>,
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
        .reset_password(&request.token, &request.code, &request.new_password)
        .await
    {
        Ok(result) => verified_response(result),
        Err(error) => handle_domain_error(error),
    }
}
