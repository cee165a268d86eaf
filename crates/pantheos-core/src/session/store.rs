//! Session store trait.
//!
//! Defines the interface for session persistence operations.

use super::model::Session;
use crate::error::Result;

/// An abstract store for the single active session record.
///
/// The store exclusively owns the persisted session; flows never touch the
/// underlying record directly. `save` always fully replaces the record,
/// there are no merging semantics.
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the current session, if one is stored and signed in.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: A signed-in session is stored
    /// - `Ok(None)`: Nothing stored, the record is signed-out, or the
    ///   stored value failed to parse (implementations purge stale records)
    /// - `Err(CoreError)`: Error if retrieval fails
    async fn current(&self) -> Result<Option<Session>>;

    /// Overwrites the session record.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Removes the session record. Succeeds when no record exists.
    async fn clear(&self) -> Result<()>;
}
