//! Application Layer
//!
//! Use cases and the credential service.

pub mod config;
pub mod join;
pub mod login;
pub mod service;

// Re-exports
pub use config::UsersConfig;
pub use join::{JoinInput, JoinOutput, JoinUseCase};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use service::CredentialService;
