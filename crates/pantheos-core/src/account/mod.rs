//! Account domain model and repository trait.

pub mod model;
pub mod repository;

pub use model::{Account, DEFAULT_AVATAR};
pub use repository::AccountRepository;
