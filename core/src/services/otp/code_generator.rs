//! Secure OTP code generation

use rand::{rngs::OsRng, RngCore};

use crate::domain::entities::otp_code::{OtpCode, CODE_MAX, CODE_MIN};
use crate::errors::OtpError;

/// Number of distinct codes
const CODE_SPAN: u32 = CODE_MAX - CODE_MIN + 1;

/// Largest multiple of `CODE_SPAN` representable in a `u32`; draws at or
/// above it are rejected so every code is equally likely.
const ACCEPT_LIMIT: u32 = u32::MAX - (u32::MAX % CODE_SPAN);

/// Source of OTP codes
pub trait CodeGenerator: Send + Sync {
    /// Produce a fresh code
    fn generate(&self) -> Result<OtpCode, OtpError>;
}

/// Default generator backed by the operating system CSPRNG
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureCodeGenerator;

impl CodeGenerator for SecureCodeGenerator {
    fn generate(&self) -> Result<OtpCode, OtpError> {
        generate_code()
    }
}

/// Generate a uniformly distributed code in `[100000, 999999]`
///
/// Uses `OsRng` with rejection sampling. A failing random source is
/// reported as [`OtpError::EntropyUnavailable`]; no weaker fallback is used.
pub fn generate_code() -> Result<OtpCode, OtpError> {
    let mut bytes = [0u8; 4];
    loop {
        OsRng.try_fill_bytes(&mut bytes).map_err(|e| {
            tracing::error!(
                error = %e,
                event = "otp_entropy_unavailable",
                "OS random source failed while generating OTP code"
            );
            OtpError::EntropyUnavailable
        })?;

        let draw = u32::from_le_bytes(bytes);
        if draw < ACCEPT_LIMIT {
            let value = CODE_MIN + draw % CODE_SPAN;
            return OtpCode::from_value(value).map_err(|_| OtpError::EntropyUnavailable);
        }
    }
}
