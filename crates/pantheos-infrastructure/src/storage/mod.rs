//! Low-level record storage.

pub mod atomic_json;

pub use atomic_json::AtomicJsonFile;
