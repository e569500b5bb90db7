use serde::{Deserialize, Serialize};
use validator::Validate;

use mt_core::services::account::AccountActionResult;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailRequest {
    #[validate(length(min = 3, max = 254))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TokenCodeRequest {
    #[validate(length(min = 1, max = 4096))]
    pub token: String,

    #[validate(length(min = 1, max = 32))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, max = 4096))]
    pub token: String,

    #[validate(length(min = 1, max = 32))]
    pub code: String,

    /// Strength rules are enforced by the account service
    #[validate(length(min = 1, max = 128))]
    pub new_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountActionResponse {
    pub success: bool,
    pub detail: String,
}

impl From<AccountActionResult> for AccountActionResponse {
    fn from(result: AccountActionResult) -> Self {
        Self {
            success: result.success,
            detail: result.detail,
        }
    }
}
