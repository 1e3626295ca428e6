//! Account directory: lookup and creation of persisted account records

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use keygate_shared::PublicUser;
use time::OffsetDateTime;
use uuid::Uuid;

pub use memory::MemoryDirectory;
pub use postgres::PgDirectory;

/// A persisted account record. The password hash never crosses the
/// directory/service boundary; outward-facing code sees [`PublicUser`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    /// Stored lowercase; globally unique
    pub email: String,
    pub password_hash: String,
    pub created_at: OffsetDateTime,
}

impl Account {
    /// Public projection of this account, excluding the password hash.
    pub fn public_view(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Fields supplied by the service when creating an account. The directory
/// assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Store of account records keyed by email and id.
///
/// The uniqueness invariant (one account per normalized email) is enforced
/// by the directory itself, not by callers: `create` must fail with
/// [`DirectoryError::Duplicate`] when the email is already taken, even if a
/// caller's pre-check raced past it.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DirectoryError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DirectoryError>;

    async fn create(&self, account: NewAccount) -> Result<Account, DirectoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Account already exists")]
    Duplicate,
    #[error("Directory error: {0}")]
    Database(String),
}
