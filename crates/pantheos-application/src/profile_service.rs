//! Profile editing, logout, and account deletion.

use pantheos_core::account::{Account, AccountRepository};
use pantheos_core::error::{CoreError, Result as CoreResult};
use pantheos_core::session::{Session, SessionStore};
use pantheos_core::validate::{MIN_PASSWORD_LEN, MIN_USERNAME_LEN, is_valid_email};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Why a profile update was rejected.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// No signed-in session; the flow has nothing to edit.
    #[error("no signed-in session")]
    NotSignedIn,

    /// Malformed or missing input; the user corrects and retries.
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] CoreError),
}

/// Why an account deletion did not happen.
#[derive(Error, Debug)]
pub enum DeleteAccountError {
    /// No signed-in session; there is no account to delete.
    #[error("no signed-in session")]
    NotSignedIn,

    /// One of the confirmation stages was declined.
    #[error("Account deletion cancelled. Your account is safe.")]
    Aborted,

    /// The re-typed username does not match the signed-in one.
    #[error("Username does not match. Account deletion cancelled for your safety.")]
    Mismatch,

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] CoreError),
}

/// Input for [`ProfileService::update_profile`].
///
/// Password fields stay empty when the user is not changing their
/// password. `pending_avatar` carries a freshly picked image data URI.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileRequest {
    pub username: String,
    pub email: String,
    pub current_password: String,
    pub new_password: String,
    pub confirm_new_password: String,
    pub pending_avatar: Option<String>,
}

/// Input for [`ProfileService::delete_account`].
///
/// Mirrors the three-stage confirmation the UI walks through: an initial
/// warning, the re-typed username, and a final warning.
#[derive(Debug, Clone)]
pub struct DeleteAccountRequest {
    /// The user acknowledged the first warning.
    pub confirmed: bool,
    /// Exact re-typed username; compared case-sensitively.
    pub typed_username: String,
    /// The user acknowledged the final warning.
    pub final_confirmed: bool,
}

/// Profile flows for the signed-in user.
///
/// Every operation reads the persisted session at its start; there is no
/// in-memory current user to drift out of sync with the store.
pub struct ProfileService {
    accounts: Arc<dyn AccountRepository>,
    sessions: Arc<dyn SessionStore>,
}

impl ProfileService {
    /// Creates a new `ProfileService` over the given stores.
    pub fn new(accounts: Arc<dyn AccountRepository>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { accounts, sessions }
    }

    /// Returns the persisted session, if any. The saved-session check the
    /// site runs on page load.
    pub async fn current_session(&self) -> CoreResult<Option<Session>> {
        self.sessions.current().await
    }

    /// Applies profile edits for the signed-in user and returns the
    /// refreshed session.
    ///
    /// The account is located by the session's username as stored, so a
    /// username edit rewrites the right record. When the session points at
    /// no account (stale data) the directory is left alone and only the
    /// session is updated, matching the site's behavior.
    pub async fn update_profile(
        &self,
        request: UpdateProfileRequest,
    ) -> Result<Session, ProfileError> {
        let session = self
            .sessions
            .current()
            .await?
            .ok_or(ProfileError::NotSignedIn)?;

        let username = request.username.trim();
        let email = request.email.trim();

        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(ProfileError::Validation {
                field: "username",
                message: "Username must be at least 3 characters long!".to_string(),
            });
        }

        if !is_valid_email(email) {
            return Err(ProfileError::Validation {
                field: "email",
                message: "Please enter a valid email address!".to_string(),
            });
        }

        let wants_password_change =
            !request.new_password.is_empty() || !request.confirm_new_password.is_empty();

        if wants_password_change {
            // The current password is required but never verified against
            // the stored one, matching the site.
            if request.current_password.is_empty() {
                return Err(ProfileError::Validation {
                    field: "current_password",
                    message: "Please enter your current password!".to_string(),
                });
            }

            if request.new_password.chars().count() < MIN_PASSWORD_LEN {
                return Err(ProfileError::Validation {
                    field: "new_password",
                    message: "Password must be at least 6 characters long!".to_string(),
                });
            }

            if request.new_password != request.confirm_new_password {
                return Err(ProfileError::Validation {
                    field: "confirm_new_password",
                    message: "Passwords do not match!".to_string(),
                });
            }
        }

        let mut accounts = self.accounts.get_all().await?;
        let session_username = session.username.to_lowercase();

        match accounts
            .iter_mut()
            .find(|account| account.username.to_lowercase() == session_username)
        {
            Some(account) => {
                account.username = username.to_string();
                account.email = email.to_string();
                if wants_password_change {
                    account.password = request.new_password.clone();
                }
                self.accounts.save_all(&accounts).await?;
            }
            None => {
                warn!(
                    username = %session.username,
                    "no account matches the signed-in session; updating session only"
                );
            }
        }

        let updated = Session {
            username: username.to_string(),
            email: email.to_string(),
            profile_pic: request.pending_avatar.unwrap_or(session.profile_pic),
            is_logged_in: true,
        };
        self.sessions.save(&updated).await?;
        info!(username = %updated.username, "profile updated");

        Ok(updated)
    }

    /// Signs the current user out by clearing the session record.
    pub async fn logout(&self) -> Result<(), ProfileError> {
        self.sessions
            .current()
            .await?
            .ok_or(ProfileError::NotSignedIn)?;

        self.sessions.clear().await?;
        info!("logged out");

        Ok(())
    }

    /// Deletes the signed-in account after the full confirmation sequence.
    ///
    /// A declined stage or a mismatched username aborts with no side
    /// effects; only a fully confirmed request touches either store.
    pub async fn delete_account(
        &self,
        request: DeleteAccountRequest,
    ) -> Result<(), DeleteAccountError> {
        let session = self
            .sessions
            .current()
            .await?
            .ok_or(DeleteAccountError::NotSignedIn)?;

        if !request.confirmed {
            return Err(DeleteAccountError::Aborted);
        }

        if request.typed_username != session.username {
            return Err(DeleteAccountError::Mismatch);
        }

        if !request.final_confirmed {
            return Err(DeleteAccountError::Aborted);
        }

        let session_username = session.username.to_lowercase();
        let accounts = self.accounts.get_all().await?;
        let remaining: Vec<Account> = accounts
            .into_iter()
            .filter(|account| account.username.to_lowercase() != session_username)
            .collect();

        self.accounts.save_all(&remaining).await?;
        self.sessions.clear().await?;
        info!(username = %session.username, "account deleted");

        Ok(())
    }
}
