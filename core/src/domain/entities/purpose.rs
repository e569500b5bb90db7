//! Verification purpose tag.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use mt_shared::utils::validation::slugify;

use crate::errors::ValidationError;

/// Why a code was issued
///
/// A token minted for one purpose must not be accepted for another. The
/// label is what travels inside the token; the slug is the path segment of
/// the emailed link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Purpose {
    /// Confirm ownership of the account email address
    EmailVerify,
    /// Authorize replacing the account password
    PasswordReset,
}

impl Purpose {
    /// All known purposes
    pub const ALL: [Purpose; 2] = [Purpose::EmailVerify, Purpose::PasswordReset];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Purpose::EmailVerify => "email verify",
            Purpose::PasswordReset => "password reset",
        }
    }

    /// URL path segment: lowercase label with spaces replaced by hyphens
    pub fn slug(&self) -> String {
        slugify(self.label())
    }

    /// Subject line used when the caller does not supply one
    pub fn default_subject(&self) -> &'static str {
        match self {
            Purpose::EmailVerify => "Verify your email address",
            Purpose::PasswordReset => "Reset your password",
        }
    }
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Purpose {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = slugify(s).replace('_', "-");
        Purpose::ALL
            .into_iter()
            .find(|purpose| purpose.slug() == wanted)
            .ok_or_else(|| ValidationError::UnknownPurpose {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for Purpose {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Purpose> for String {
    fn from(purpose: Purpose) -> Self {
        purpose.label().to_string()
    }
}
