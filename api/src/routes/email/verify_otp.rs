use actix_web::{web, HttpResponse};
use validator::Validate;

use mt_core::errors::DomainError;
use mt_core::repositories::UserRepository;
use mt_core::services::otp::MailServiceTrait;

use crate::app::AppState;
use crate::dto::email::{VerifyOtpRequest, VerifyOtpResponse};
use crate::handlers::{handle_domain_error, validation_error_response, verify_failure_response};

/// Handler for POST /api/v1/email/verify-otp
///
/// Checks a submitted code against the token from the verification link.
///
/// # Responses
/// - 200 OK: `{"success": true, "identity": "...", "purpose": "..."}`
/// - 400 Bad Request: `code_mismatch`, `purpose_mismatch` or malformed body
/// - 401 Unauthorized: `invalid_signature` or `malformed` token
/// - 409 Conflict: `already_used` (single-use deployments)
/// - 410 Gone: `expired`
pub async fn verify_otp<U, M>(
    state: web::Data<AppState<U, M>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: MailServiceTrait + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(errors);
    }

    let result = match state.otp_service.verify(&request.token, &request.code).await {
        Ok(result) => result,
        Err(error) => return handle_domain_error(error),
    };

    if let Some(reason) = result.reason {
        return verify_failure_response(reason);
    }

    match (result.identity, result.purpose) {
        (Some(identity), Some(purpose)) => HttpResponse::Ok().json(VerifyOtpResponse {
            success: true,
            identity,
            purpose: purpose.label().to_string(),
        }),
        _ => handle_domain_error(DomainError::Internal {
            message: "Verification result carried neither identity nor reason".to_string(),
        }),
    }
}
