//! Account Store Trait
//!
//! Interface for account persistence. Implementations are in the
//! infrastructure layer.

use crate::domain::entity::account::Account;
use crate::domain::value_object::username::Username;
use crate::error::UserResult;

/// Result of an insert attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// The username was already taken; nothing was written
    Conflict,
}

/// Account store trait
///
/// `insert` must be atomic with respect to the username: when two inserts
/// race for one username exactly one sees `Inserted`.
#[trait_variant::make(AccountStore: Send)]
pub trait LocalAccountStore {
    /// Find account by username
    async fn find_by_username(&self, username: &Username) -> UserResult<Option<Account>>;

    /// Insert a new account unless the username is taken
    async fn insert(&self, account: &Account) -> UserResult<InsertOutcome>;

    /// Number of stored accounts with this username (0 or 1)
    async fn count_by_username(&self, username: &Username) -> UserResult<u64>;
}
