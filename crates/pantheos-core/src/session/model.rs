//! Session domain model.

use crate::account::Account;
use serde::{Deserialize, Serialize};

/// The single signed-in identity for this browser profile.
///
/// A session mirrors the account's public fields as of the last save; the
/// flows refresh it whenever a profile change commits. At most one session
/// exists at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub username: String,
    pub email: String,
    pub profile_pic: String,
    /// A stored session with this flag false is treated as signed-out.
    pub is_logged_in: bool,
}

impl Session {
    /// Builds a signed-in session from an account's public fields.
    pub fn for_account(account: &Account) -> Self {
        Self {
            username: account.username.clone(),
            email: account.email.clone(),
            profile_pic: account.profile_pic.clone(),
            is_logged_in: true,
        }
    }
}
