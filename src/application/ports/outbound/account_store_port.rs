use async_trait::async_trait;

use crate::domain::aggregates::AccountSnapshot;

#[derive(Debug, thiserror::Error)]
pub enum AccountStoreError {
    #[error("Account not found")]
    NotFound,
    #[error("Wrong password")]
    BadCredentials,
    #[error("Username is already taken")]
    AlreadyExists,
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Account persistence keyed by username
#[async_trait]
pub trait AccountStorePort: Send + Sync {
    async fn load(&self, username: &str, password: &str)
        -> Result<AccountSnapshot, AccountStoreError>;
    async fn create(&self, username: &str, password: &str)
        -> Result<AccountSnapshot, AccountStoreError>;
    /// Overwrite currency, experience and collection of an existing account
    async fn persist(&self, snapshot: &AccountSnapshot) -> Result<(), AccountStoreError>;
    /// Accounts ordered by experience, highest first
    async fn list_ranked(&self, limit: usize) -> Result<Vec<AccountSnapshot>, AccountStoreError>;
}
