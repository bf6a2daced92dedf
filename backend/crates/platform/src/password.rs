//! Password Hashing and Verification
//!
//! Salted, memory-hard password hashing with:
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - A work factor fixed when the scheme is constructed
//! - Zeroization of sensitive data
//! - Constant-time verification inside the hash library
//!
//! ## Security Features
//! - A fresh random salt for every hash
//! - Memory-hard hashing prevents GPU/ASIC attacks
//! - Zeroization prevents memory inspection attacks
//! - Pepper support for additional security layer

use std::fmt;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::{self, SaltString},
};
use rand::rngs::OsRng;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing/verification errors
///
/// None of these describe a wrong password: a mismatch is `Ok(false)`
/// from [`PasswordScheme::verify`].
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Verification could not be carried out
    #[error("Password verification failed: {0}")]
    VerificationFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,

    /// Work factor rejected by the hash library
    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),
}

// ============================================================================
// Work factor
// ============================================================================

/// Argon2id work factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HashingParams {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for HashingParams {
    /// OWASP recommended Argon2id parameters: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self {
            memory_kib: Params::DEFAULT_M_COST,
            iterations: Params::DEFAULT_T_COST,
            parallelism: Params::DEFAULT_P_COST,
        }
    }
}

impl HashingParams {
    pub const fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> Self {
        Self {
            memory_kib,
            iterations,
            parallelism,
        }
    }

    fn to_argon2(self) -> Result<Params, PasswordHashError> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None)
            .map_err(|e| PasswordHashError::InvalidParams(e.to_string()))
    }
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// Format rules (length, emptiness) belong to the caller; any string is
/// accepted here.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<String> for ClearTextPassword {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
///
/// The PHC string carries the algorithm, version, parameters and salt
/// alongside the hash, so a stored value can always be verified even after
/// the configured work factor changes.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Password Scheme
// ============================================================================

/// Hashing strategy used by the account service
///
/// Implementations must salt every hash and must verify through the
/// algorithm's own constant-time routine.
pub trait PasswordScheme: Send + Sync {
    /// Hash a clear text password with a fresh salt
    fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError>;

    /// Check `candidate` against the `stored` hash
    ///
    /// Returns `Ok(false)` on mismatch. `Err` is reserved for hashes that
    /// cannot be checked at all.
    fn verify(
        &self,
        candidate: &ClearTextPassword,
        stored: &HashedPassword,
    ) -> Result<bool, PasswordHashError>;

    /// Whether `stored` was produced with other parameters than the current ones
    fn needs_rehash(&self, stored: &HashedPassword) -> bool;
}

/// Argon2id password scheme
#[derive(Clone)]
pub struct Argon2Scheme {
    argon2: Argon2<'static>,
    params: HashingParams,
    pepper: Option<Zeroizing<Vec<u8>>>,
}

impl Argon2Scheme {
    /// Build a scheme with a fixed work factor
    ///
    /// ## Arguments
    /// * `params` - Argon2id work factor
    /// * `pepper` - Optional application-wide secret appended to every password
    pub fn new(params: HashingParams, pepper: Option<Vec<u8>>) -> Result<Self, PasswordHashError> {
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params.to_argon2()?);
        Ok(Self {
            argon2,
            params,
            pepper: pepper.map(Zeroizing::new),
        })
    }

    pub fn params(&self) -> HashingParams {
        self.params
    }

    /// Combine password with pepper if configured
    fn peppered(&self, password: &ClearTextPassword) -> Zeroizing<Vec<u8>> {
        let mut bytes = password.as_bytes().to_vec();
        if let Some(pepper) = &self.pepper {
            bytes.extend_from_slice(pepper);
        }
        Zeroizing::new(bytes)
    }
}

impl fmt::Debug for Argon2Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Scheme")
            .field("params", &self.params)
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl PasswordScheme for Argon2Scheme {
    fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        // 128-bit random salt
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(&self.peppered(password), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    fn verify(
        &self,
        candidate: &ClearTextPassword,
        stored: &HashedPassword,
    ) -> Result<bool, PasswordHashError> {
        let parsed =
            PasswordHash::new(&stored.hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        // Parameters come from the PHC string, not from `self.params`
        match self.argon2.verify_password(&self.peppered(candidate), &parsed) {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(e) => Err(PasswordHashError::VerificationFailed(e.to_string())),
        }
    }

    fn needs_rehash(&self, stored: &HashedPassword) -> bool {
        let Ok(parsed) = PasswordHash::new(&stored.hash) else {
            return true;
        };

        if parsed.algorithm != Algorithm::Argon2id.ident() {
            return true;
        }

        match Params::try_from(&parsed) {
            Ok(p) => {
                p.m_cost() != self.params.memory_kib
                    || p.t_cost() != self.params.iterations
                    || p.p_cost() != self.params.parallelism
            }
            Err(_) => true,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
