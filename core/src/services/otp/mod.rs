//! One-time passcode issuance and verification
//!
//! This module provides the email OTP workflow:
//! - Cryptographically secure six digit code generation
//! - Signed, self-contained verification tokens (no server-side code store)
//! - Email delivery through a pluggable transport with a bounded wait
//! - Constant-time code verification with purpose binding
//! - Optional single-use enforcement through a replay guard

mod code_generator;
mod config;
pub mod mock;
mod replay_guard;
mod service;
mod token_codec;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use code_generator::{generate_code, CodeGenerator, SecureCodeGenerator};
pub use config::OtpServiceConfig;
pub use replay_guard::InMemoryReplayGuard;
pub use service::{OtpService, DELIVERY_FAILED_DETAIL, DELIVERY_SUCCESS_DETAIL};
pub use token_codec::OtpTokenCodec;
pub use traits::{MailServiceTrait, ReplayGuardTrait};
pub use types::{IssueResult, OtpRecipient, VerifyFailure, VerifyResult};
