//! Postgres-backed account directory

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Account, AccountDirectory, DirectoryError, NewAccount};

/// Account directory backed by a Postgres `accounts` table.
/// The unique index on `email` is the source of truth for the uniqueness
/// invariant; a violation surfaces as [`DirectoryError::Duplicate`].
#[derive(Clone)]
pub struct PgDirectory {
    pool: PgPool,
}

impl PgDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountDirectory for PgDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DirectoryError> {
        sqlx::query_as::<_, Account>(
            "SELECT id, name, email, password_hash, created_at FROM accounts WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DirectoryError> {
        sqlx::query_as::<_, Account>(
            "SELECT id, name, email, password_hash, created_at FROM accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)
    }

    async fn create(&self, account: NewAccount) -> Result<Account, DirectoryError> {
        sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(&account.name)
        .bind(&account.email)
        .bind(&account.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }
}

fn map_db_error(err: sqlx::Error) -> DirectoryError {
    if let sqlx::Error::Database(db_err) = &err {
        // PostgreSQL unique violation
        if db_err.code().as_deref() == Some("23505") {
            return DirectoryError::Duplicate;
        }
    }
    tracing::error!("Database error: {:?}", err);
    DirectoryError::Database(err.to_string())
}
