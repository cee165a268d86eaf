//! JSON-file-backed SessionStore implementation.

use crate::paths::PantheosPaths;
use crate::storage::AtomicJsonFile;
use async_trait::async_trait;
use pantheos_core::error::Result;
use pantheos_core::session::{Session, SessionStore};
use std::fs;
use std::path::Path;

/// Stores the single active session as `session.json`.
///
/// Reads are self-healing: a session file that no longer parses is deleted
/// and reported as absent, so a corrupted record degrades to signed-out
/// instead of wedging the site.
pub struct JsonSessionStore {
    file: AtomicJsonFile<Session>,
}

impl JsonSessionStore {
    /// Creates a store rooted at the given base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the base directory cannot be created.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let paths = PantheosPaths::new(base_dir.as_ref());
        fs::create_dir_all(paths.base_dir())?;

        Ok(Self {
            file: AtomicJsonFile::new(paths.session_file()),
        })
    }

    /// Creates a store at the default location (`~/.pantheos`).
    pub fn default_location() -> Result<Self> {
        let paths = PantheosPaths::default_location()?;
        Self::new(paths.base_dir())
    }
}

#[async_trait]
impl SessionStore for JsonSessionStore {
    async fn current(&self) -> Result<Option<Session>> {
        match self.file.load() {
            Ok(Some(session)) if session.is_logged_in => Ok(Some(session)),
            Ok(_) => Ok(None),
            Err(e) if e.is_serialization() => {
                tracing::warn!(error = %e, "purging unreadable session record");
                self.file.remove()?;
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn save(&self, session: &Session) -> Result<()> {
        self.file.save(session)?;
        tracing::debug!(username = %session.username, "saved session");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.file.remove()?;
        tracing::debug!("cleared session");
        Ok(())
    }
}
