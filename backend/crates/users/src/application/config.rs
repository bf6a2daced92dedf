//! Application Configuration
//!
//! Service-side settings for the Users module.

use std::fmt;

use platform::crypto::random_key;
use platform::password::{Argon2Scheme, HashingParams, PasswordHashError};

use crate::infra::credential::HmacCredentialIssuer;

/// Users application configuration
#[derive(Clone)]
pub struct UsersConfig {
    /// Secret key for signing credentials (32 bytes)
    pub credential_secret: [u8; 32],
    /// Argon2 work factor, fixed for the lifetime of the service
    pub hashing: HashingParams,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            credential_secret: [0u8; 32],
            hashing: HashingParams::default(),
            password_pepper: None,
        }
    }
}

impl UsersConfig {
    /// Create config with a random credential secret (for development)
    ///
    /// Credentials issued with it do not survive a restart.
    pub fn development() -> Self {
        Self {
            credential_secret: random_key(),
            ..Default::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Build the password scheme for these settings
    pub fn password_scheme(&self) -> Result<Argon2Scheme, PasswordHashError> {
        Argon2Scheme::new(self.hashing, self.password_pepper.clone())
    }

    /// Build the credential issuer for these settings
    pub fn credential_issuer(&self) -> HmacCredentialIssuer {
        HmacCredentialIssuer::new(self.credential_secret)
    }
}

impl fmt::Debug for UsersConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsersConfig")
            .field("credential_secret", &"[REDACTED]")
            .field("hashing", &self.hashing)
            .field("password_pepper", &self.pepper().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_secret_is_random() {
        let a = UsersConfig::development();
        let b = UsersConfig::development();
        assert_ne!(a.credential_secret, b.credential_secret);
        assert_eq!(a.hashing, HashingParams::default());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = UsersConfig {
            credential_secret: [7u8; 32],
            hashing: HashingParams::new(8, 1, 1),
            password_pepper: Some(b"spicy".to_vec()),
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("spicy"));
        assert!(!debug.contains("7, 7"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_scheme_uses_configured_params() {
        let config = UsersConfig {
            hashing: HashingParams::new(8, 1, 1),
            ..UsersConfig::development()
        };
        let scheme = config.password_scheme().unwrap();
        assert_eq!(scheme.params(), HashingParams::new(8, 1, 1));
    }
}
