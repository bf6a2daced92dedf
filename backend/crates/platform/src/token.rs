//! Signed opaque tokens
//!
//! `base64url(payload) "." base64url(HMAC-SHA256(secret, payload))`
//!
//! The payload is integrity-protected, not encrypted.

use thiserror::Error;

use crate::crypto::{from_base64url, hmac_sha256, to_base64url, verify_hmac_sha256};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,

    #[error("Token signature mismatch")]
    BadSignature,
}

/// Sign `payload` with `secret`
pub fn sign(secret: &[u8], payload: &[u8]) -> String {
    let signature = hmac_sha256(secret, payload);
    format!("{}.{}", to_base64url(payload), to_base64url(&signature))
}

/// Check the signature and return the payload
pub fn verify(secret: &[u8], token: &str) -> Result<Vec<u8>, TokenError> {
    let (payload_b64, signature_b64) = token.split_once('.').ok_or(TokenError::Malformed)?;

    let payload = from_base64url(payload_b64).map_err(|_| TokenError::Malformed)?;
    let signature = from_base64url(signature_b64).map_err(|_| TokenError::Malformed)?;

    if !verify_hmac_sha256(secret, &payload, &signature) {
        return Err(TokenError::BadSignature);
    }

    Ok(payload)
}
