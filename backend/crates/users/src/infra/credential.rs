//! HMAC-signed credential issuer

use chrono::Utc;
use platform::crypto::{random_bytes, to_base64url};
use serde::{Deserialize, Serialize};

use crate::domain::credential::{Credential, CredentialError, CredentialIssuer};
use crate::domain::entity::account::Account;

/// Claims bound into the credential payload
#[derive(Debug, Serialize, Deserialize)]
pub struct CredentialClaims {
    /// Account ID
    pub sub: String,
    /// Username at issue time
    pub name: String,
    /// Issued at (unix ms)
    pub iat: i64,
    /// Random nonce, makes every credential unique
    pub jti: String,
}

/// Issues `payload.signature` credentials signed with a server secret
#[derive(Clone)]
pub struct HmacCredentialIssuer {
    secret: [u8; 32],
}

impl HmacCredentialIssuer {
    pub fn new(secret: [u8; 32]) -> Self {
        Self { secret }
    }
}

impl CredentialIssuer for HmacCredentialIssuer {
    fn issue(&self, account: &Account) -> Result<Credential, CredentialError> {
        let claims = CredentialClaims {
            sub: account.account_id.to_string(),
            name: account.username.to_string(),
            iat: Utc::now().timestamp_millis(),
            jti: to_base64url(&random_bytes(16)),
        };
        let payload = serde_json::to_vec(&claims)?;

        Ok(Credential::new(platform::token::sign(&self.secret, &payload)))
    }
}
