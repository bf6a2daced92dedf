//! Credential Service
//!
//! Entry point for join and login. The store, password scheme and
//! credential issuer are injected; the service keeps no account state
//! between calls.

use std::sync::Arc;

use platform::password::{Argon2Scheme, ClearTextPassword, PasswordScheme};

use crate::application::config::UsersConfig;
use crate::application::join::{JoinInput, JoinOutput, JoinUseCase};
use crate::application::login::{LoginInput, LoginOutput, LoginUseCase};
use crate::domain::credential::CredentialIssuer;
use crate::domain::repository::AccountStore;
use crate::domain::value_object::username::Username;
use crate::error::UserResult;
use crate::infra::credential::HmacCredentialIssuer;

pub struct CredentialService<S, P, C>
where
    S: AccountStore,
    P: PasswordScheme + 'static,
    C: CredentialIssuer,
{
    join: JoinUseCase<S, P>,
    login: LoginUseCase<S, P, C>,
}

impl<S, P, C> CredentialService<S, P, C>
where
    S: AccountStore,
    P: PasswordScheme + 'static,
    C: CredentialIssuer,
{
    pub fn new(store: Arc<S>, scheme: Arc<P>, issuer: Arc<C>) -> Self {
        Self {
            join: JoinUseCase::new(Arc::clone(&store), Arc::clone(&scheme)),
            login: LoginUseCase::new(store, scheme, issuer),
        }
    }

    /// Register `username` with `password`
    ///
    /// Fails with `USERNAME_DUPLICATED` when the username is taken,
    /// whether seen by the pre-check or by the store's insert.
    pub async fn join(
        &self,
        username: Username,
        password: ClearTextPassword,
    ) -> UserResult<JoinOutput> {
        self.join.execute(JoinInput { username, password }).await
    }

    /// Authenticate and issue a credential
    ///
    /// Fails with `USERNAME_NOTFOUND` or `INVALID_PASSWORD`.
    pub async fn login(
        &self,
        username: Username,
        password: ClearTextPassword,
    ) -> UserResult<LoginOutput> {
        self.login.execute(LoginInput { username, password }).await
    }
}

impl<S> CredentialService<S, Argon2Scheme, HmacCredentialIssuer>
where
    S: AccountStore,
{
    /// Wire the service from configuration
    pub fn from_config(store: S, config: &UsersConfig) -> UserResult<Self> {
        Ok(Self::new(
            Arc::new(store),
            Arc::new(config.password_scheme()?),
            Arc::new(config.credential_issuer()),
        ))
    }
}
