//! Business services containing domain logic and use cases.

pub mod account;
pub mod otp;

// Re-export commonly used types
pub use account::{AccountActionResult, AccountService, AccountServiceConfig};
pub use otp::{
    CodeGenerator, InMemoryReplayGuard, IssueResult, MailServiceTrait, OtpRecipient, OtpService,
    OtpServiceConfig, OtpTokenCodec, ReplayGuardTrait, SecureCodeGenerator, VerifyFailure,
    VerifyResult,
};
