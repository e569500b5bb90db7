//! Email validation and normalization helpers

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern compiles")
});

/// Maximum length of an email address (RFC 5321)
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Trim and lowercase an email address
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if an email address has a deliverable shape
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LENGTH && EMAIL_PATTERN.is_match(email)
}

/// Mask an email address for logging, keeping the first character and domain
///
/// `john.doe@example.com` becomes `j***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}

/// Turn a free-form label into a URL path segment
///
/// Lowercases and replaces spaces with hyphens: `Email Verify` becomes
/// `email-verify`.
pub fn slugify(label: &str) -> String {
    label.trim().replace(' ', "-").to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  JohnDoe@Email.COM "), "johndoe@email.com");
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("john.doe+admin@mail.example.org"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("spaces in@x.com"));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("john.doe@example.com"), "j***@example.com");
        assert_eq!(mask_email("broken"), "***");
        assert_eq!(mask_email("@example.com"), "***");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("email verify"), "email-verify");
        assert_eq!(slugify("Password Reset"), "password-reset");
        assert_eq!(slugify("already-slugged"), "already-slugged");
    }
}
