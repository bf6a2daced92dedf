//! Domain Layer
//!
//! Contains entities, value objects, and the collaborator traits.

pub mod credential;
pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use credential::{Credential, CredentialError, CredentialIssuer};
pub use entity::account::Account;
pub use repository::{AccountStore, InsertOutcome};
pub use value_object::username::Username;
