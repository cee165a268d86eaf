//! Default on-disk locations for the persisted records.
//!
//! All Pantheos account data lives under one base directory:
//!
//! ```text
//! ~/.pantheos/
//! ├── accounts.json    # ordered list of registered accounts
//! └── session.json     # the single active session, when signed in
//! ```

use pantheos_core::{CoreError, Result};
use std::path::{Path, PathBuf};

/// Resolves the files that make up the local account store.
#[derive(Debug, Clone)]
pub struct PantheosPaths {
    base_dir: PathBuf,
}

impl PantheosPaths {
    /// Creates a path resolver rooted at an explicit base directory.
    ///
    /// Tests point this at a temporary directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Creates a resolver rooted at the default location (`~/.pantheos`).
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn default_location() -> Result<Self> {
        let home_dir = dirs::home_dir()
            .ok_or_else(|| CoreError::data_access("Cannot determine home directory"))?;
        Ok(Self::new(home_dir.join(".pantheos")))
    }

    /// Returns the base directory holding all records.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the path of the account list record.
    pub fn accounts_file(&self) -> PathBuf {
        self.base_dir.join("accounts.json")
    }

    /// Returns the path of the session record.
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }
}
