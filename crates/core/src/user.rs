//! Staff account validation.

use std::sync::LazyLock;

use regex::Regex;

/// Minimum password length for new accounts and password changes.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Accounts created by an administrator must use the institutional domain.
pub const INSTITUTIONAL_EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._-]+@academico\.ifpb\.edu\.br$";

static INSTITUTIONAL_EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(INSTITUTIONAL_EMAIL_PATTERN).expect("valid regex"));

/// Validate that `email` belongs to the institutional academic domain.
pub fn validate_institutional_email(email: &str) -> Result<(), String> {
    if INSTITUTIONAL_EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err("Only @academico.ifpb.edu.br email addresses are allowed".to_string())
    }
}

/// Validate that a password meets the minimum length.
pub fn validate_password_strength(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        ));
    }
    Ok(())
}

/// Check that a password and its confirmation match.
pub fn validate_password_confirmation(password: &str, confirmation: &str) -> Result<(), String> {
    if password != confirmation {
        return Err("Passwords do not match".to_string());
    }
    Ok(())
}
