//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC-SHA256, Base64, random bytes)
//! - Password hashing (Argon2id behind the [`password::PasswordScheme`] seam)
//! - Signed opaque tokens

pub mod crypto;
pub mod password;
pub mod token;
