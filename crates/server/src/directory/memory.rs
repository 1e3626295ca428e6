//! In-memory account directory for tests and local experimentation

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{Account, AccountDirectory, DirectoryError, NewAccount};

/// Account directory held entirely in process memory. Enforces the same
/// email-uniqueness invariant as the Postgres directory.
#[derive(Clone, Default)]
pub struct MemoryDirectory {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub fn len(&self) -> usize {
        self.accounts.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove an account out of band. Exists so tests can exercise the
    /// valid-token-but-deleted-account path.
    pub fn remove(&self, id: Uuid) {
        if let Ok(mut map) = self.accounts.write() {
            map.remove(&id);
        }
    }
}

#[async_trait]
impl AccountDirectory for MemoryDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DirectoryError> {
        let map = self
            .accounts
            .read()
            .map_err(|e| DirectoryError::Database(e.to_string()))?;
        Ok(map.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DirectoryError> {
        let map = self
            .accounts
            .read()
            .map_err(|e| DirectoryError::Database(e.to_string()))?;
        Ok(map.get(&id).cloned())
    }

    async fn create(&self, account: NewAccount) -> Result<Account, DirectoryError> {
        let mut map = self
            .accounts
            .write()
            .map_err(|e| DirectoryError::Database(e.to_string()))?;

        if map.values().any(|a| a.email == account.email) {
            return Err(DirectoryError::Duplicate);
        }

        let record = Account {
            id: Uuid::new_v4(),
            name: account.name,
            email: account.email,
            password_hash: account.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        map.insert(record.id, record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            name: "Ann".to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_and_lookup() {
        let directory = MemoryDirectory::new();
        let created = directory.create(new_account("ann@x.com")).await.unwrap();

        let by_email = directory.find_by_email("ann@x.com").await.unwrap();
        assert_eq!(by_email.map(|a| a.id), Some(created.id));

        let by_id = directory.find_by_id(created.id).await.unwrap();
        assert_eq!(by_id.map(|a| a.email), Some("ann@x.com".to_string()));
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let directory = MemoryDirectory::new();
        directory.create(new_account("ann@x.com")).await.unwrap();

        let result = directory.create(new_account("ann@x.com")).await;
        assert!(matches!(result, Err(DirectoryError::Duplicate)));
        assert_eq!(directory.len(), 1);
    }
}
