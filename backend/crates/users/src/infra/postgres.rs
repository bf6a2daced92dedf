//! PostgreSQL Account Store

use chrono::{DateTime, Utc};
use kernel::id::AccountId;
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::account::Account;
use crate::domain::repository::{AccountStore, InsertOutcome};
use crate::domain::value_object::username::Username;
use crate::error::{UserError, UserResult};

/// PostgreSQL unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed account store
///
/// Relies on the `accounts.username` UNIQUE constraint for atomic inserts.
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AccountStore for PgAccountStore {
    async fn find_by_username(&self, username: &Username) -> UserResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT
                account_id,
                username,
                password_hash,
                created_at
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn insert(&self, account: &Account) -> UserResult<InsertOutcome> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                username,
                password_hash,
                created_at
            ) VALUES ($1, $2, $3, $4)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.username.as_str())
        .bind(account.password_hash.as_phc_string())
        .bind(account.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(done) if done.rows_affected() == 0 => Ok(InsertOutcome::Conflict),
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(sqlx::Error::Database(db_err))
                if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) =>
            {
                Ok(InsertOutcome::Conflict)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn count_by_username(&self, username: &Username) -> UserResult<u64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM accounts WHERE username = $1")
            .bind(username.as_str())
            .fetch_one(&self.pool)
            .await?;

        u64::try_from(count).map_err(|e| UserError::Internal(format!("Invalid row count: {e}")))
    }
}

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    username: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> UserResult<Account> {
        Ok(Account {
            account_id: AccountId::from_uuid(self.account_id),
            username: Username::new(self.username),
            password_hash: HashedPassword::from_phc_string(self.password_hash)?,
            created_at: self.created_at,
        })
    }
}
