//! Account flows for registered users

pub mod password;
pub mod verification;

pub use password::{forgot_password, reset_password};
pub use verification::{request_verification, verify_email};

use actix_web::HttpResponse;

use mt_core::services::account::AccountActionResult;

use crate::dto::users::AccountActionResponse;
use crate::handlers::verify_failure_response;

/// Response for a request that emails a code
fn issued_response(result: AccountActionResult) -> HttpResponse {
    if result.success {
        HttpResponse::Ok().json(AccountActionResponse::from(result))
    } else {
        HttpResponse::BadGateway().json(AccountActionResponse::from(result))
    }
}

/// Response for a request that consumes a code
fn verified_response(result: AccountActionResult) -> HttpResponse {
    match result.reason {
        Some(reason) => verify_failure_response(reason),
        None => HttpResponse::Ok().json(AccountActionResponse::from(result)),
    }
}
