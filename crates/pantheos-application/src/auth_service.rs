//! Login and signup flows.

use pantheos_core::account::{Account, AccountRepository};
use pantheos_core::error::CoreError;
use pantheos_core::session::{Session, SessionStore};
use pantheos_core::validate::{MIN_PASSWORD_LEN, MIN_USERNAME_LEN, is_valid_email};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Which unique field a signup collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictField {
    Username,
    Email,
}

impl std::fmt::Display for ConflictField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictField::Username => write!(f, "username"),
            ConflictField::Email => write!(f, "email"),
        }
    }
}

/// Why a login attempt was rejected.
#[derive(Error, Debug)]
pub enum LoginError {
    /// Malformed or missing input; the user corrects and retries.
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// No account matches the supplied identifier.
    #[error("Account not found! Please sign up first or check your username/email.")]
    NotFound,

    /// The stored password differs from the supplied one.
    #[error("Incorrect password! Please try again.")]
    WrongPassword,

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] CoreError),
}

/// Why a signup attempt was rejected.
#[derive(Error, Debug)]
pub enum SignupError {
    /// Malformed or missing input; the user corrects and retries.
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// The requested username or email is already registered.
    #[error("{0} already taken")]
    Conflict(ConflictField),

    /// The underlying store failed.
    #[error(transparent)]
    Store(#[from] CoreError),
}

/// Input for [`AuthService::login`].
#[derive(Debug, Clone, Default)]
pub struct LoginRequest {
    /// Username or email; matched case-insensitively against both fields.
    pub identifier: String,
    pub password: String,
}

/// Input for [`AuthService::signup`].
#[derive(Debug, Clone, Default)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub terms_accepted: bool,
}

/// Login and signup over the account directory and session store.
///
/// Validation runs in a fixed order and short-circuits on the first
/// failure; nothing is written to either store until every check passed.
pub struct AuthService {
    accounts: Arc<dyn AccountRepository>,
    sessions: Arc<dyn SessionStore>,
}

impl AuthService {
    /// Creates a new `AuthService` over the given stores.
    pub fn new(accounts: Arc<dyn AccountRepository>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { accounts, sessions }
    }

    /// Signs a user in by username or email.
    ///
    /// On success the session store holds a signed-in [`Session`] mirroring
    /// the account. On any failure the session store is untouched.
    pub async fn login(&self, request: LoginRequest) -> Result<Account, LoginError> {
        let identifier = request.identifier.trim();

        if identifier.is_empty() {
            return Err(LoginError::Validation {
                field: "identifier",
                message: "Please enter your username or email!".to_string(),
            });
        }

        if request.password.is_empty() {
            return Err(LoginError::Validation {
                field: "password",
                message: "Please enter your password!".to_string(),
            });
        }

        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(LoginError::Validation {
                field: "password",
                message: "Password must be at least 6 characters long!".to_string(),
            });
        }

        let account = self
            .accounts
            .find_by_identifier(identifier)
            .await?
            .ok_or(LoginError::NotFound)?;

        // Exact string comparison; passwords are stored verbatim.
        if account.password != request.password {
            debug!(identifier, "login rejected: wrong password");
            return Err(LoginError::WrongPassword);
        }

        self.sessions.save(&Session::for_account(&account)).await?;
        info!(username = %account.username, "login succeeded");

        Ok(account)
    }

    /// Registers a new account.
    ///
    /// Signup deliberately does not create a session; the caller routes the
    /// new user to the login step with their fresh credentials.
    pub async fn signup(&self, request: SignupRequest) -> Result<Account, SignupError> {
        let username = request.username.trim();
        let email = request.email.trim();

        if username.is_empty() {
            return Err(SignupError::Validation {
                field: "username",
                message: "Please enter a username!".to_string(),
            });
        }

        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(SignupError::Validation {
                field: "username",
                message: "Username must be at least 3 characters long!".to_string(),
            });
        }

        if email.is_empty() {
            return Err(SignupError::Validation {
                field: "email",
                message: "Please enter your email address!".to_string(),
            });
        }

        if !is_valid_email(email) {
            return Err(SignupError::Validation {
                field: "email",
                message: "Please enter a valid email address!".to_string(),
            });
        }

        if request.password.is_empty() {
            return Err(SignupError::Validation {
                field: "password",
                message: "Please enter a password!".to_string(),
            });
        }

        if request.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SignupError::Validation {
                field: "password",
                message: "Password must be at least 6 characters long!".to_string(),
            });
        }

        if request.confirm_password.is_empty() {
            return Err(SignupError::Validation {
                field: "confirm_password",
                message: "Please confirm your password!".to_string(),
            });
        }

        if request.password != request.confirm_password {
            return Err(SignupError::Validation {
                field: "confirm_password",
                message: "Passwords do not match! Please make sure both passwords are identical."
                    .to_string(),
            });
        }

        if !request.terms_accepted {
            return Err(SignupError::Validation {
                field: "terms",
                message: "You must agree to the Terms of Service and Privacy Policy before creating an account!".to_string(),
            });
        }

        // The username must not collide with any existing username OR email;
        // the combined identifier lookup checks both at once.
        if self.accounts.find_by_identifier(username).await?.is_some() {
            return Err(SignupError::Conflict(ConflictField::Username));
        }

        let mut accounts = self.accounts.get_all().await?;

        let email_lower = email.to_lowercase();
        if accounts
            .iter()
            .any(|account| account.email.to_lowercase() == email_lower)
        {
            return Err(SignupError::Conflict(ConflictField::Email));
        }

        let account = Account::new(username, email, request.password.clone());
        accounts.push(account.clone());
        self.accounts.save_all(&accounts).await?;
        info!(username = %account.username, "account created");

        Ok(account)
    }
}
