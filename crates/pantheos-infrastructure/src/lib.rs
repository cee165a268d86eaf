//! File-backed infrastructure for the Pantheos account core.
//!
//! Persists the two logical records (account list, session) as JSON files
//! under a base directory, with atomic writes and advisory locking.

pub mod json_account_repository;
pub mod json_session_store;
pub mod paths;
pub mod storage;

pub use json_account_repository::JsonAccountRepository;
pub use json_session_store::JsonSessionStore;
pub use paths::PantheosPaths;
