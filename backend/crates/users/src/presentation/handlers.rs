//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use kernel::error::app_error::AppResult;
use platform::password::PasswordScheme;

use crate::application::service::CredentialService;
use crate::domain::credential::CredentialIssuer;
use crate::domain::repository::AccountStore;
use crate::presentation::dto::{JoinRequest, LoginRequest};

/// Body returned by a successful join
pub const JOIN_SUCCESS_MESSAGE: &str = "회원가입에 성공했습니다!";

/// Shared state for users handlers
pub struct UsersAppState<S, P, C>
where
    S: AccountStore,
    P: PasswordScheme + 'static,
    C: CredentialIssuer,
{
    pub service: Arc<CredentialService<S, P, C>>,
}

// derive(Clone) would require S, P and C to be Clone
impl<S, P, C> Clone for UsersAppState<S, P, C>
where
    S: AccountStore,
    P: PasswordScheme + 'static,
    C: CredentialIssuer,
{
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
        }
    }
}

// ============================================================================
// Join
// ============================================================================

/// POST /api/v1/users/join
pub async fn join<S, P, C>(
    State(state): State<UsersAppState<S, P, C>>,
    payload: Result<Json<JoinRequest>, JsonRejection>,
) -> AppResult<(StatusCode, &'static str)>
where
    S: AccountStore + Send + Sync + 'static,
    P: PasswordScheme + 'static,
    C: CredentialIssuer + 'static,
{
    let Json(req) = payload?;
    let (username, password) = req.into_parts()?;

    state.service.join(username, password).await?;

    Ok((StatusCode::OK, JOIN_SUCCESS_MESSAGE))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/v1/users/login
///
/// The credential is the whole response body.
pub async fn login<S, P, C>(
    State(state): State<UsersAppState<S, P, C>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<(StatusCode, String)>
where
    S: AccountStore + Send + Sync + 'static,
    P: PasswordScheme + 'static,
    C: CredentialIssuer + 'static,
{
    let Json(req) = payload?;
    let (username, password) = req.into_parts()?;

    let output = state.service.login(username, password).await?;

    Ok((StatusCode::OK, output.credential.into_string()))
}
