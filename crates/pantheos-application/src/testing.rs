//! In-memory test doubles for the repository traits.

use async_trait::async_trait;
use pantheos_core::account::{Account, AccountRepository};
use pantheos_core::error::Result;
use pantheos_core::session::{Session, SessionStore};
use std::sync::Mutex;

/// Account repository backed by a plain vector.
pub struct MemoryAccountRepository {
    accounts: Mutex<Vec<Account>>,
}

impl MemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_accounts(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Mutex::new(accounts),
        }
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn get_all(&self) -> Result<Vec<Account>> {
        Ok(self.accounts.lock().unwrap().clone())
    }

    async fn save_all(&self, accounts: &[Account]) -> Result<()> {
        *self.accounts.lock().unwrap() = accounts.to_vec();
        Ok(())
    }
}

/// Session store holding at most one session in memory.
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            session: Mutex::new(None),
        }
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn current(&self) -> Result<Option<Session>> {
        Ok(self
            .session
            .lock()
            .unwrap()
            .clone()
            .filter(|s| s.is_logged_in))
    }

    async fn save(&self, session: &Session) -> Result<()> {
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}
