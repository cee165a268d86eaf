//! Two-step password reset flow.
//!
//! Step one takes the account email and pretends to send a verification
//! code; step two takes the code and the new password. No code is actually
//! generated or compared: the site simulates the out-of-band channel and
//! only checks the code's length. Codes never expire.

use pantheos_core::account::{Account, AccountRepository};
use pantheos_core::error::CoreError;
use pantheos_core::validate::{MIN_PASSWORD_LEN, RESET_CODE_LEN, is_valid_email};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Why a reset step was rejected.
#[derive(Error, Debug)]
pub enum ResetError {
    /// Malformed or missing input; the user corrects and retries the step.
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The step was called while the flow was in the other state.
    #[error("reset flow is not awaiting {expected}")]
    InvalidState { expected: &'static str },

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] CoreError),
}

/// What the confirm step did to the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetOutcome {
    /// The matching account's password was overwritten.
    PasswordUpdated,
    /// No account matched the email; a fresh one was created from it.
    AccountCreated,
}

#[derive(Debug, Clone, PartialEq)]
enum ResetState {
    AwaitingEmail,
    AwaitingCode { email: String },
}

/// The password reset state machine.
///
/// One value per reset attempt. A successful confirm returns the flow to
/// `AwaitingEmail`; a failed confirm stays in `AwaitingCode` so the user
/// can fix their input without requesting a new code.
pub struct PasswordResetFlow {
    accounts: Arc<dyn AccountRepository>,
    state: ResetState,
}

impl PasswordResetFlow {
    /// Creates a flow in the `AwaitingEmail` state.
    pub fn new(accounts: Arc<dyn AccountRepository>) -> Self {
        Self {
            accounts,
            state: ResetState::AwaitingEmail,
        }
    }

    /// True while the flow waits for the verification code (step two).
    pub fn awaiting_code(&self) -> bool {
        matches!(self.state, ResetState::AwaitingCode { .. })
    }

    /// Step one: validates the email and advances to the code step.
    ///
    /// Sending the code is simulated; nothing leaves the machine.
    pub async fn request_code(&mut self, email: &str) -> Result<(), ResetError> {
        if self.state != ResetState::AwaitingEmail {
            return Err(ResetError::InvalidState { expected: "email" });
        }

        let email = email.trim();

        if email.is_empty() {
            return Err(ResetError::Validation {
                field: "email",
                message: "Please enter your email address!".to_string(),
            });
        }

        if !is_valid_email(email) {
            return Err(ResetError::Validation {
                field: "email",
                message: "Please enter a valid email address!".to_string(),
            });
        }

        debug!(email, "verification code send simulated");
        self.state = ResetState::AwaitingCode {
            email: email.to_string(),
        };

        Ok(())
    }

    /// Step two: validates the code and replaces the password.
    ///
    /// When no account matches the remembered email, a fresh account is
    /// created from it, matching the site's prototype behavior. The branch
    /// is reported as [`ResetOutcome::AccountCreated`] so callers can tell
    /// it apart from a normal reset.
    pub async fn confirm(
        &mut self,
        code: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<ResetOutcome, ResetError> {
        let email = match &self.state {
            ResetState::AwaitingCode { email } => email.clone(),
            ResetState::AwaitingEmail => {
                return Err(ResetError::InvalidState { expected: "code" });
            }
        };

        // Length-only check; the simulation accepts any 6-character code.
        if code.trim().chars().count() != RESET_CODE_LEN {
            return Err(ResetError::Validation {
                field: "code",
                message: "Please enter the 6-digit verification code!".to_string(),
            });
        }

        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ResetError::Validation {
                field: "new_password",
                message: "Password must be at least 6 characters long!".to_string(),
            });
        }

        if new_password != confirm_password {
            return Err(ResetError::Validation {
                field: "confirm_password",
                message: "Passwords do not match!".to_string(),
            });
        }

        let mut accounts = self.accounts.get_all().await?;
        let email_lower = email.to_lowercase();

        let outcome = match accounts
            .iter_mut()
            .find(|account| account.email.to_lowercase() == email_lower)
        {
            Some(account) => {
                account.password = new_password.to_string();
                info!(username = %account.username, "password reset");
                ResetOutcome::PasswordUpdated
            }
            None => {
                let username = email.split('@').next().unwrap_or_default().to_string();
                info!(%username, "reset for unknown email, creating account");
                accounts.push(Account::new(username, email, new_password));
                ResetOutcome::AccountCreated
            }
        };

        self.accounts.save_all(&accounts).await?;
        self.state = ResetState::AwaitingEmail;

        Ok(outcome)
    }
}
