//! Input validation helpers shared by the account flows.

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum username length accepted at signup and profile edit.
pub const MIN_USERNAME_LEN: usize = 3;

/// Minimum password length accepted everywhere a password is set or checked.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Exact length of a password-reset verification code.
pub const RESET_CODE_LEN: usize = 6;

// Same shape check the site has always used: local@domain.tld, no spaces.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex compiles"));

/// Returns true when `email` matches the basic `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}
