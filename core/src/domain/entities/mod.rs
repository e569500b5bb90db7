//! Domain entities representing core business objects.

pub mod claims;
pub mod envelope;
pub mod otp_code;
pub mod purpose;
pub mod user;

#[cfg(test)]
mod tests;

// Re-export commonly used types
pub use claims::VerificationClaims;
pub use envelope::{DeliveryEnvelope, EmailBody};
pub use otp_code::{OtpCode, CODE_LENGTH, CODE_MAX, CODE_MIN};
pub use purpose::Purpose;
pub use user::UserRecord;
