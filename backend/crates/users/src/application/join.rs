//! Join Use Case
//!
//! Registers a new account under a unique username.

use std::sync::Arc;

use platform::password::{ClearTextPassword, PasswordScheme};

use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountStore, InsertOutcome};
use crate::domain::value_object::username::Username;
use crate::error::{UserError, UserResult};

/// Join input
pub struct JoinInput {
    pub username: Username,
    pub password: ClearTextPassword,
}

/// Join output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutput {
    pub username: Username,
}

/// Join use case
pub struct JoinUseCase<S, P>
where
    S: AccountStore,
    P: PasswordScheme + 'static,
{
    store: Arc<S>,
    scheme: Arc<P>,
}

impl<S, P> JoinUseCase<S, P>
where
    S: AccountStore,
    P: PasswordScheme + 'static,
{
    pub fn new(store: Arc<S>, scheme: Arc<P>) -> Self {
        Self { store, scheme }
    }

    pub async fn execute(&self, input: JoinInput) -> UserResult<JoinOutput> {
        let JoinInput { username, password } = input;

        // Fast path only; the store's insert decides
        if self.store.find_by_username(&username).await?.is_some() {
            return Err(UserError::username_duplicated(&username));
        }

        let scheme = Arc::clone(&self.scheme);
        let password_hash = tokio::task::spawn_blocking(move || scheme.hash(&password))
            .await
            .map_err(|e| UserError::Internal(format!("Hashing task failed: {e}")))??;

        let account = Account::new(username, password_hash);

        match self.store.insert(&account).await? {
            InsertOutcome::Inserted => {}
            InsertOutcome::Conflict => {
                return Err(UserError::username_duplicated(&account.username));
            }
        }

        tracing::info!(
            username = %account.username,
            account_id = %account.account_id,
            "Account joined"
        );

        Ok(JoinOutput {
            username: account.username,
        })
    }
}
