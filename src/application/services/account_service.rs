//! Account Service - Registration, login and logout
//!
//! Registration and login hand back a live [`PlayerAccount`]; the caller
//! owns it for the lifetime of the session. Logout saves the final state
//! and drops nothing from the store.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::application::ports::outbound::{AccountStoreError, AccountStorePort};
use crate::application::services::persistence_service::PersistenceQueue;
use crate::domain::aggregates::PlayerAccount;

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] AccountStoreError),
}

pub struct AccountService {
    store: Arc<dyn AccountStorePort>,
    persistence: PersistenceQueue,
}

impl AccountService {
    pub fn new(store: Arc<dyn AccountStorePort>, persistence: PersistenceQueue) -> Self {
        Self { store, persistence }
    }

    #[instrument(skip(self, password))]
    pub async fn register(&self, username: &str, password: &str) -> Result<PlayerAccount, AccountError> {
        let username = validate_credentials(username, password)?;
        let snapshot = self.store.create(username, password).await.map_err(|e| {
            warn!(error = %e, "Registration rejected");
            e
        })?;
        info!(currency = snapshot.currency, "Account registered");
        Ok(PlayerAccount::from_snapshot(snapshot))
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<PlayerAccount, AccountError> {
        let username = validate_credentials(username, password)?;
        // Saves still queued from an earlier session must land before reading
        self.persistence.flush().await;
        let snapshot = self.store.load(username, password).await.map_err(|e| {
            warn!(error = %e, "Login rejected");
            e
        })?;
        info!(
            currency = snapshot.currency,
            experience = snapshot.experience,
            creatures = snapshot.collection.len(),
            "Account logged in"
        );
        Ok(PlayerAccount::from_snapshot(snapshot))
    }

    /// Save the closing state of a session
    pub fn logout(&self, account: &PlayerAccount) {
        self.persistence.enqueue(account.snapshot());
        info!(username = %account.username(), "Account logged out");
    }
}

/// Both fields are required; the username is trimmed
fn validate_credentials<'a>(username: &'a str, password: &str) -> Result<&'a str, AccountError> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AccountError::Validation("Username is required".to_string()));
    }
    if password.is_empty() {
        return Err(AccountError::Validation("Password is required".to_string()));
    }
    Ok(username)
}
