//! Login Use Case
//!
//! Checks a username/password pair and issues a credential.
//! Read-only against the store.

use std::sync::Arc;

use platform::password::{ClearTextPassword, PasswordScheme};

use crate::domain::credential::{Credential, CredentialIssuer};
use crate::domain::repository::AccountStore;
use crate::domain::value_object::username::Username;
use crate::error::{UserError, UserResult};

/// Login input
pub struct LoginInput {
    pub username: Username,
    pub password: ClearTextPassword,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub credential: Credential,
}

/// Login use case
pub struct LoginUseCase<S, P, C>
where
    S: AccountStore,
    P: PasswordScheme + 'static,
    C: CredentialIssuer,
{
    store: Arc<S>,
    scheme: Arc<P>,
    issuer: Arc<C>,
}

impl<S, P, C> LoginUseCase<S, P, C>
where
    S: AccountStore,
    P: PasswordScheme + 'static,
    C: CredentialIssuer,
{
    pub fn new(store: Arc<S>, scheme: Arc<P>, issuer: Arc<C>) -> Self {
        Self {
            store,
            scheme,
            issuer,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> UserResult<LoginOutput> {
        let LoginInput { username, password } = input;

        let account = self
            .store
            .find_by_username(&username)
            .await?
            .ok_or_else(|| UserError::username_not_found(&username))?;

        let scheme = Arc::clone(&self.scheme);
        let stored = account.password_hash.clone();
        let (valid, needs_rehash) = tokio::task::spawn_blocking(move || {
            let valid = scheme.verify(&password, &stored)?;
            Ok::<_, UserError>((valid, valid && scheme.needs_rehash(&stored)))
        })
        .await
        .map_err(|e| UserError::Internal(format!("Verification task failed: {e}")))??;

        if !valid {
            return Err(UserError::invalid_password());
        }

        if needs_rehash {
            tracing::debug!(
                username = %account.username,
                "Stored hash uses outdated parameters"
            );
        }

        let credential = self.issuer.issue(&account)?;

        tracing::info!(
            username = %account.username,
            account_id = %account.account_id,
            "Account logged in"
        );

        Ok(LoginOutput { credential })
    }
}
