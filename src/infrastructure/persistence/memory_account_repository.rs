//! In-memory account store for tests and ephemeral servers

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::outbound::{AccountStoreError, AccountStorePort};
use crate::domain::aggregates::AccountSnapshot;

struct StoredAccount {
    password: String,
    snapshot: AccountSnapshot,
    /// Registration order, used to break experience ties
    sequence: u64,
}

pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<String, StoredAccount>>,
    starting_currency: u64,
}

impl InMemoryAccountRepository {
    pub fn new(starting_currency: u64) -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            starting_currency,
        }
    }
}

#[async_trait]
impl AccountStorePort for InMemoryAccountRepository {
    async fn load(&self, username: &str, password: &str) -> Result<AccountSnapshot, AccountStoreError> {
        let accounts = self.accounts.read().await;
        let account = accounts.get(username).ok_or(AccountStoreError::NotFound)?;
        if account.password != password {
            return Err(AccountStoreError::BadCredentials);
        }
        Ok(account.snapshot.clone())
    }

    async fn create(&self, username: &str, password: &str) -> Result<AccountSnapshot, AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(username) {
            return Err(AccountStoreError::AlreadyExists);
        }
        let snapshot = AccountSnapshot::fresh(username, self.starting_currency);
        let sequence = accounts.len() as u64;
        accounts.insert(
            username.to_string(),
            StoredAccount {
                password: password.to_string(),
                snapshot: snapshot.clone(),
                sequence,
            },
        );
        Ok(snapshot)
    }

    async fn persist(&self, snapshot: &AccountSnapshot) -> Result<(), AccountStoreError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .get_mut(&snapshot.username)
            .ok_or(AccountStoreError::NotFound)?;
        account.snapshot = snapshot.clone();
        Ok(())
    }

    async fn list_ranked(&self, limit: usize) -> Result<Vec<AccountSnapshot>, AccountStoreError> {
        let accounts = self.accounts.read().await;
        let mut ranked: Vec<&StoredAccount> = accounts.values().collect();
        ranked.sort_by(|a, b| {
            b.snapshot
                .experience
                .cmp(&a.snapshot.experience)
                .then(a.sequence.cmp(&b.sequence))
        });
        Ok(ranked
            .into_iter()
            .take(limit)
            .map(|account| account.snapshot.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ties_keep_registration_order() {
        let repo = InMemoryAccountRepository::new(500);
        for name in ["first", "second", "third"] {
            repo.create(name, "pw").await.unwrap();
        }
        let mut boosted = AccountSnapshot::fresh("third", 500);
        boosted.experience = 10;
        repo.persist(&boosted).await.unwrap();

        let ranked = repo.list_ranked(50).await.unwrap();
        let names: Vec<&str> = ranked.iter().map(|s| s.username.as_str()).collect();
        assert_eq!(names, vec!["third", "first", "second"]);
    }
}
