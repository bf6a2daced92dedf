//! API DTOs (Data Transfer Objects)

use kernel::error::app_error::{AppError, AppResult};
use platform::password::ClearTextPassword;
use serde::Deserialize;

use crate::domain::value_object::username::Username;

/// Username/password pair shared by join and login
///
/// No `Debug`: the body carries a clear text password.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsRequest {
    #[serde(alias = "username")]
    pub user_name: String,
    pub password: String,
}

/// Join request
pub type JoinRequest = CredentialsRequest;

/// Login request
pub type LoginRequest = CredentialsRequest;

impl CredentialsRequest {
    /// Reject blank fields before the service is called
    pub fn into_parts(self) -> AppResult<(Username, ClearTextPassword)> {
        if self.user_name.trim().is_empty() {
            return Err(AppError::bad_request("userName must not be empty"));
        }
        if self.password.is_empty() {
            return Err(AppError::bad_request("password must not be empty"));
        }

        Ok((
            Username::new(self.user_name),
            ClearTextPassword::from(self.password),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> CredentialsRequest {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_accepts_both_field_spellings() {
        let camel = parse(r#"{"userName":"jungrak","password":"asdf1234"}"#);
        let lower = parse(r#"{"username":"jungrak","password":"asdf1234"}"#);
        assert_eq!(camel.user_name, "jungrak");
        assert_eq!(lower.user_name, "jungrak");
    }

    #[test]
    fn test_blank_fields_are_bad_requests() {
        let err = parse(r#"{"userName":"  ","password":"asdf1234"}"#)
            .into_parts()
            .unwrap_err();
        assert_eq!(err.status_code(), 400);

        let err = parse(r#"{"userName":"jungrak","password":""}"#)
            .into_parts()
            .unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_username_is_kept_verbatim() {
        let (username, _) = parse(r#"{"userName":" Jungrak ","password":"x"}"#)
            .into_parts()
            .unwrap();
        assert_eq!(username.as_str(), " Jungrak ");
    }
}
