//! Account flows for the Pantheos site.
//!
//! Each flow validates its input fully before touching the stores, so a
//! rejected request never leaves a partial mutation behind. The persisted
//! session is the single source of truth for "who is signed in": flows read
//! it at their start instead of holding an in-memory current user.

pub mod auth_service;
pub mod password_reset;
pub mod profile_service;

pub use auth_service::{
    AuthService, ConflictField, LoginError, LoginRequest, SignupError, SignupRequest,
};
pub use password_reset::{PasswordResetFlow, ResetError, ResetOutcome};
pub use profile_service::{
    DeleteAccountError, DeleteAccountRequest, ProfileError, ProfileService, UpdateProfileRequest,
};

#[cfg(test)]
pub(crate) mod testing;
