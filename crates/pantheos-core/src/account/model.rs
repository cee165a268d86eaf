//! Account domain model.
//!
//! Represents one registered identity on the Pantheos site.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The sentinel avatar used for accounts that never uploaded a picture.
pub const DEFAULT_AVATAR: &str = "profile.png";

/// A registered account.
///
/// Field names serialize as camelCase so that persisted records match the
/// JSON layout the site has always written.
///
/// Passwords are stored verbatim: this is a single-browser simulation with
/// no real authentication boundary. See the repository README for the
/// limits of that model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique display name, case-insensitively. Minimum 3 characters.
    pub username: String,
    /// Unique contact address, case-insensitively.
    pub email: String,
    /// Plain-text password. Minimum 6 characters.
    pub password: String,
    /// Either [`DEFAULT_AVATAR`] or an embedded image data URI.
    pub profile_pic: String,
    /// Set once at creation, never updated afterwards.
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new account with the default avatar and the current time.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            profile_pic: DEFAULT_AVATAR.to_string(),
            created_at: Utc::now(),
        }
    }

    /// Case-insensitive match of `identifier` against username or email.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        let identifier = identifier.to_lowercase();
        self.username.to_lowercase() == identifier || self.email.to_lowercase() == identifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_account_defaults() {
        let account = Account::new("hero", "hero@example.com", "secret1");

        assert_eq!(account.username, "hero");
        assert_eq!(account.profile_pic, DEFAULT_AVATAR);
        assert!(account.created_at <= Utc::now());
    }

    #[test]
    fn test_matches_identifier_is_case_insensitive() {
        let account = Account::new("Hero", "Hero@Example.com", "secret1");

        assert!(account.matches_identifier("hero"));
        assert!(account.matches_identifier("HERO@EXAMPLE.COM"));
        assert!(!account.matches_identifier("villain"));
    }

    #[test]
    fn test_serializes_with_camel_case_fields() {
        let account = Account::new("hero", "hero@example.com", "secret1");
        let json = serde_json::to_string(&account).unwrap();

        assert!(json.contains("\"profilePic\""));
        assert!(json.contains("\"createdAt\""));
    }
}
