//! Account verification service module
//!
//! Drives the OTP flow for the two account actions that need proof of
//! mailbox ownership: confirming the email address and resetting the
//! password.

mod config;
mod password;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use config::AccountServiceConfig;
pub use password::{validate_password_strength, MIN_PASSWORD_LENGTH};
pub use service::AccountService;
pub use types::AccountActionResult;
