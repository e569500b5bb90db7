pub mod email;
pub mod users;

pub use email::{SendOtpRequest, SendOtpResponse, VerifyOtpRequest, VerifyOtpResponse};
pub use users::{AccountActionResponse, EmailRequest, ResetPasswordRequest, TokenCodeRequest};
