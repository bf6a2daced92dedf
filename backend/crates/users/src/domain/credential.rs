//! Credential issued on a successful login
//!
//! The string is opaque to callers. How it is built is up to the
//! [`CredentialIssuer`] plugged into the service.

use std::fmt;

use thiserror::Error;

use crate::domain::entity::account::Account;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Failed to encode credential claims: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Opaque authentication credential
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"[REDACTED]").finish()
    }
}

/// Issues a credential for an authenticated account
pub trait CredentialIssuer: Send + Sync {
    fn issue(&self, account: &Account) -> Result<Credential, CredentialError>;
}
