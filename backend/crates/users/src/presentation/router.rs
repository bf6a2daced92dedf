//! Users Router

use std::sync::Arc;

use axum::{Router, routing::post};
use platform::password::PasswordScheme;

use crate::application::service::CredentialService;
use crate::domain::credential::CredentialIssuer;
use crate::domain::repository::AccountStore;
use crate::presentation::handlers::{self, UsersAppState};

/// Mount point of the users router
pub const USERS_PATH: &str = "/api/v1/users";

/// Create the Users router for any store, scheme and issuer
pub fn users_router<S, P, C>(service: CredentialService<S, P, C>) -> Router
where
    S: AccountStore + Send + Sync + 'static,
    P: PasswordScheme + 'static,
    C: CredentialIssuer + 'static,
{
    let state = UsersAppState {
        service: Arc::new(service),
    };

    Router::new()
        .route("/join", post(handlers::join::<S, P, C>))
        .route("/login", post(handlers::login::<S, P, C>))
        .with_state(state)
}
