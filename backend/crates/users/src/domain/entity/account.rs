//! Account Entity
//!
//! A registered user: the username key and the password hash.
//! Created only by a successful join; never updated afterwards.

use chrono::{DateTime, Utc};
use kernel::id::AccountId;
use platform::password::HashedPassword;

use crate::domain::value_object::username::Username;

/// Account entity
#[derive(Debug, Clone)]
pub struct Account {
    /// Internal UUID identifier
    pub account_id: AccountId,
    /// Unique, immutable lookup key
    pub username: Username,
    /// Salted one-way hash (PHC string)
    pub password_hash: HashedPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a new account
    pub fn new(username: Username, password_hash: HashedPassword) -> Self {
        Self {
            account_id: AccountId::new(),
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
