//! In-memory account store
//!
//! Used by tests and by the server when no database is configured.
//! Data lives as long as the process.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountStore, InsertOutcome};
use crate::domain::value_object::username::Username;
use crate::error::UserResult;

#[derive(Debug, Clone, Default)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<Username, Account>>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }
}

impl AccountStore for InMemoryAccountStore {
    async fn find_by_username(&self, username: &Username) -> UserResult<Option<Account>> {
        Ok(self.accounts.read().await.get(username).cloned())
    }

    async fn insert(&self, account: &Account) -> UserResult<InsertOutcome> {
        // Check and write under one lock
        let mut accounts = self.accounts.write().await;
        match accounts.entry(account.username.clone()) {
            Entry::Occupied(_) => Ok(InsertOutcome::Conflict),
            Entry::Vacant(slot) => {
                slot.insert(account.clone());
                Ok(InsertOutcome::Inserted)
            }
        }
    }

    async fn count_by_username(&self, username: &Username) -> UserResult<u64> {
        Ok(u64::from(self.accounts.read().await.contains_key(username)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::HashedPassword;

    // Fixed PHC string; the store never inspects the hash
    const HASH: &str = "$argon2id$v=19$m=8,t=1,p=1$c29tZXNhbHQ$Zm9vYmFyYmF6cXV4";

    fn account(username: &str) -> Account {
        Account::new(
            Username::new(username),
            HashedPassword::from_phc_string(HASH).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let store = InMemoryAccountStore::new();
        let jungrak = account("jungrak");

        assert_eq!(store.insert(&jungrak).await.unwrap(), InsertOutcome::Inserted);

        let found = store
            .find_by_username(&Username::new("jungrak"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.account_id, jungrak.account_id);
        assert!(store
            .find_by_username(&Username::new("nobody"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_second_insert_conflicts_and_keeps_first() {
        let store = InMemoryAccountStore::new();
        let first = account("jungrak");
        let second = account("jungrak");

        assert_eq!(store.insert(&first).await.unwrap(), InsertOutcome::Inserted);
        assert_eq!(store.insert(&second).await.unwrap(), InsertOutcome::Conflict);

        let username = Username::new("jungrak");
        assert_eq!(store.count_by_username(&username).await.unwrap(), 1);
        let kept = store.find_by_username(&username).await.unwrap().unwrap();
        assert_eq!(kept.account_id, first.account_id);
        assert_eq!(store.len().await, 1);
    }
}
