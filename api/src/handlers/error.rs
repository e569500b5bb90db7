//! Mapping of domain outcomes to HTTP responses
//!
//! Every error body is an [`ErrorResponse`]. Internal error text is logged
//! but never returned to the client.

use actix_web::{http::StatusCode, HttpResponse};
use validator::ValidationErrors;

use mt_core::errors::{DomainError, OtpError};
use mt_core::services::otp::VerifyFailure;
use mt_shared::errors::{error_codes, ErrorResponse};

const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// HTTP status for a rejected verification
pub fn verify_failure_status(reason: VerifyFailure) -> StatusCode {
    match reason {
        VerifyFailure::CodeMismatch | VerifyFailure::PurposeMismatch => StatusCode::BAD_REQUEST,
        VerifyFailure::Expired => StatusCode::GONE,
        VerifyFailure::InvalidSignature | VerifyFailure::Malformed => StatusCode::UNAUTHORIZED,
        VerifyFailure::AlreadyUsed => StatusCode::CONFLICT,
    }
}

/// Error response for a rejected verification
pub fn verify_failure_response(reason: VerifyFailure) -> HttpResponse {
    let body = ErrorResponse::new(reason.error_code(), reason.message())
        .add_detail("reason", reason.as_str());
    HttpResponse::build(verify_failure_status(reason)).json(body)
}

/// 400 response for a request that failed DTO validation
pub fn validation_error_response(errors: ValidationErrors) -> HttpResponse {
    let body = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid request data")
        .add_detail("validation_errors", &errors);
    HttpResponse::BadRequest().json(body)
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match error {
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new(error_codes::VALIDATION_ERROR, message))
        }
        DomainError::ValidationErr(e) => HttpResponse::BadRequest()
            .json(ErrorResponse::new(error_codes::VALIDATION_ERROR, e.to_string())),
        DomainError::NotFound { resource } => HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::NOT_FOUND,
            format!("{} not found", resource),
        )),
        DomainError::BusinessRule { message } => {
            HttpResponse::Conflict().json(ErrorResponse::new(error_codes::CONFLICT, message))
        }
        DomainError::Token(e) => verify_failure_response(VerifyFailure::from(e)),
        DomainError::Otp(OtpError::DeliveryFailure { message }) => {
            tracing::warn!(error = %message, "Email delivery failed");
            HttpResponse::BadGateway().json(ErrorResponse::new(
                error_codes::EMAIL_SEND_FAILED,
                "Email sending failed",
            ))
        }
        error => {
            tracing::error!(error = %error, "Request failed with internal error");
            HttpResponse::InternalServerError()
                .json(ErrorResponse::new(error_codes::INTERNAL_ERROR, INTERNAL_ERROR_MESSAGE))
        }
    }
}
