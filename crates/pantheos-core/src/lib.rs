pub mod account;
pub mod error;
pub mod session;
pub mod validate;

// Re-export common types
pub use account::{Account, AccountRepository, DEFAULT_AVATAR};
pub use error::{CoreError, Result};
pub use session::{Session, SessionStore};
