//! Account repository trait.
//!
//! Defines the interface for account persistence operations.

use super::model::Account;
use crate::error::Result;

/// An abstract repository for the registered account list.
///
/// This trait defines the contract for persisting and retrieving accounts,
/// decoupling the flows from the specific storage mechanism (e.g., JSON
/// file, in-memory test double).
///
/// Mutations are expressed as read-modify-write over the full list: callers
/// use `get_all`, change the vector in memory, then `save_all`. There is no
/// partial-update API; the system is single-user and single-writer.
#[async_trait::async_trait]
pub trait AccountRepository: Send + Sync {
    /// Retrieves all accounts from storage, in insertion order.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Account>)`: All stored accounts; empty when nothing stored
    /// - `Err(CoreError)`: Error if retrieval fails
    async fn get_all(&self) -> Result<Vec<Account>>;

    /// Saves all accounts to storage, replacing the stored list.
    ///
    /// # Arguments
    ///
    /// * `accounts` - The accounts to save
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Accounts saved successfully
    /// - `Err(CoreError)`: Error if save fails
    async fn save_all(&self, accounts: &[Account]) -> Result<()>;

    /// Finds an account by username or email, case-insensitively.
    ///
    /// First match wins. Duplicates cannot occur as long as the uniqueness
    /// invariant holds, so the scan order only matters for corrupted data.
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<Account>> {
        let accounts = self.get_all().await?;
        Ok(accounts
            .into_iter()
            .find(|account| account.matches_identifier(identifier)))
    }
}
