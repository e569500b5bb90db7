pub mod error;
pub mod health;

pub use error::{
    handle_domain_error, validation_error_response, verify_failure_response,
    verify_failure_status,
};
