//! Users Error Types
//!
//! Domain failures form a closed taxonomy ([`ErrorCode`]) with a fixed
//! status mapping. Everything else (storage, hashing, credential issuance)
//! is an unexpected failure and maps to 500.

use std::borrow::Cow;

use axum::response::{IntoResponse, Response};
use derive_more::Display;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use thiserror::Error;

use crate::domain::credential::CredentialError;
use crate::domain::value_object::username::Username;

/// Users-specific result type alias
pub type UserResult<T> = Result<T, UserError>;

/// Closed set of domain failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorCode {
    #[display("USERNAME_DUPLICATED")]
    UsernameDuplicated,
    #[display("USERNAME_NOTFOUND")]
    UsernameNotFound,
    #[display("INVALID_PASSWORD")]
    InvalidPassword,
}

impl ErrorCode {
    pub const ALL: [ErrorCode; 3] = [
        ErrorCode::UsernameDuplicated,
        ErrorCode::UsernameNotFound,
        ErrorCode::InvalidPassword,
    ];

    /// Wire representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UsernameDuplicated => "USERNAME_DUPLICATED",
            ErrorCode::UsernameNotFound => "USERNAME_NOTFOUND",
            ErrorCode::InvalidPassword => "INVALID_PASSWORD",
        }
    }

    /// Fixed boundary classification
    pub const fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::UsernameDuplicated => ErrorKind::Conflict,
            ErrorCode::UsernameNotFound => ErrorKind::NotFound,
            ErrorCode::InvalidPassword => ErrorKind::Unauthorized,
        }
    }
}

/// Users-specific error variants
#[derive(Debug, Error)]
pub enum UserError {
    /// Domain failure from the closed taxonomy
    #[error("{message}")]
    Rejected {
        code: ErrorCode,
        message: Cow<'static, str>,
    },

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing or verification could not run
    #[error("Password hashing error: {0}")]
    Hashing(#[from] PasswordHashError),

    /// Credential could not be issued
    #[error("Credential issuance failed: {0}")]
    Credential(#[from] CredentialError),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl UserError {
    pub fn username_duplicated(username: &Username) -> Self {
        UserError::Rejected {
            code: ErrorCode::UsernameDuplicated,
            message: format!("{username} already exists").into(),
        }
    }

    pub fn username_not_found(username: &Username) -> Self {
        UserError::Rejected {
            code: ErrorCode::UsernameNotFound,
            message: format!("{username} is not registered").into(),
        }
    }

    pub fn invalid_password() -> Self {
        UserError::Rejected {
            code: ErrorCode::InvalidPassword,
            message: Cow::Borrowed("Invalid password"),
        }
    }

    /// Taxonomy code, `None` for unexpected failures
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            UserError::Rejected { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        self.code()
            .map_or(ErrorKind::InternalServerError, |code| code.kind())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            UserError::Database(e) => {
                tracing::error!(error = %e, "Users database error");
            }
            UserError::Hashing(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            UserError::Credential(e) => {
                tracing::error!(error = %e, "Credential issuance error");
            }
            UserError::Internal(msg) => {
                tracing::error!(message = %msg, "Users internal error");
            }
            UserError::Rejected {
                code: ErrorCode::InvalidPassword,
                ..
            } => {
                tracing::warn!("Invalid login attempt");
            }
            UserError::Rejected { code, message } => {
                tracing::debug!(code = %code, message = %message, "Request rejected");
            }
        }
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        err.log();
        let app_err = AppError::new(err.kind(), err.to_string());
        let app_err = match err.code() {
            Some(code) => app_err.with_code(code.as_str()),
            None => app_err,
        };
        app_err.with_source(err)
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table_is_fixed() {
        assert_eq!(ErrorCode::UsernameDuplicated.kind().status_code(), 409);
        assert_eq!(ErrorCode::UsernameNotFound.kind().status_code(), 404);
        assert_eq!(ErrorCode::InvalidPassword.kind().status_code(), 401);
    }

    #[test]
    fn test_every_code_is_a_client_error() {
        for code in ErrorCode::ALL {
            assert!(!code.kind().is_server_error(), "{code} maps to 5xx");
            assert_eq!(code.to_string(), code.as_str());
        }
    }

    #[test]
    fn test_unexpected_failures_map_to_500() {
        let errors = [
            UserError::Database(sqlx::Error::PoolTimedOut),
            UserError::Hashing(PasswordHashError::InvalidHashFormat),
            UserError::Internal("boom".to_string()),
        ];
        for err in errors {
            assert_eq!(err.code(), None);
            assert_eq!(err.kind(), ErrorKind::InternalServerError);
        }
    }

    #[test]
    fn test_messages_carry_username() {
        let username = Username::new("jungrak");
        let err = UserError::username_duplicated(&username);
        assert_eq!(err.code(), Some(ErrorCode::UsernameDuplicated));
        assert_eq!(err.to_string(), "jungrak already exists");

        let err = UserError::username_not_found(&Username::new("nobody"));
        assert_eq!(err.code(), Some(ErrorCode::UsernameNotFound));
        assert!(err.to_string().contains("nobody"));
    }

    #[test]
    fn test_app_error_carries_code() {
        let app_err = AppError::from(UserError::invalid_password());
        assert_eq!(app_err.status_code(), 401);
        assert_eq!(app_err.code(), Some("INVALID_PASSWORD"));

        let app_err = AppError::from(UserError::Internal("boom".to_string()));
        assert_eq!(app_err.status_code(), 500);
        assert_eq!(app_err.code(), None);
    }
}
