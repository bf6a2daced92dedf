//! Infrastructure Layer
//!
//! Account store implementations and the credential issuer.

pub mod credential;
pub mod memory;
pub mod postgres;

pub use credential::HmacCredentialIssuer;
pub use memory::InMemoryAccountStore;
pub use postgres::PgAccountStore;
