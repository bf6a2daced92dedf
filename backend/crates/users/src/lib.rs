//! Users (Account) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, store and issuer traits
//! - `application/` - Join/login use cases and the credential service
//! - `infra/` - Account stores and the credential issuer
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Join (registration) with username + password
//! - Login returning an opaque credential
//! - Closed error taxonomy (`USERNAME_DUPLICATED`, `USERNAME_NOTFOUND`,
//!   `INVALID_PASSWORD`) with a fixed status mapping
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, salted per hash, work factor fixed by config
//! - Username uniqueness enforced by the store; the pre-check is only a fast path
//! - Hashing runs on the blocking thread pool

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::UsersConfig;
pub use application::service::CredentialService;
pub use error::{ErrorCode, UserError, UserResult};
pub use infra::credential::HmacCredentialIssuer;
pub use infra::memory::InMemoryAccountStore;
pub use infra::postgres::PgAccountStore;
pub use presentation::router::{USERS_PATH, users_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
