//! JSON-file-backed AccountRepository implementation.

use crate::paths::PantheosPaths;
use crate::storage::AtomicJsonFile;
use async_trait::async_trait;
use pantheos_core::account::{Account, AccountRepository};
use pantheos_core::error::Result;
use std::fs;
use std::path::Path;

/// Stores the full account list as one JSON array in `accounts.json`.
///
/// `save_all` replaces the stored list in a single atomic write, so a
/// partially applied mutation is never visible on disk. Insertion order is
/// preserved across round-trips.
pub struct JsonAccountRepository {
    file: AtomicJsonFile<Vec<Account>>,
}

impl JsonAccountRepository {
    /// Creates a repository rooted at the given base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the base directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let paths = PantheosPaths::new(base_dir.as_ref());
        fs::create_dir_all(paths.base_dir())?;

        Ok(Self {
            file: AtomicJsonFile::new(paths.accounts_file()),
        })
    }

    /// Creates a repository at the default location (`~/.pantheos`).
    pub fn default_location() -> Result<Self> {
        let paths = PantheosPaths::default_location()?;
        Self::new(paths.base_dir())
    }
}

#[async_trait]
impl AccountRepository for JsonAccountRepository {
    async fn get_all(&self) -> Result<Vec<Account>> {
        Ok(self.file.load()?.unwrap_or_default())
    }

    async fn save_all(&self, accounts: &[Account]) -> Result<()> {
        self.file.save(&accounts.to_vec())?;
        tracing::debug!(count = accounts.len(), "saved account list");
        Ok(())
    }
}
