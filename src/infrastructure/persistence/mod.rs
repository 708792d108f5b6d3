//! Account persistence adapters
//!
//! SQLite is the durable backend; the in-memory store serves tests and
//! throwaway servers.

mod account_repository;
mod memory_account_repository;

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::application::ports::outbound::AccountStorePort;
use crate::infrastructure::config::{AccountStoreBackend, AppConfig};

pub use account_repository::SqliteAccountRepository;
pub use memory_account_repository::InMemoryAccountRepository;

/// Build the configured account store
pub async fn create_account_store(config: &AppConfig) -> Result<Arc<dyn AccountStorePort>> {
    match config.account_store {
        AccountStoreBackend::Memory => {
            tracing::warn!("Using in-memory account store, accounts are lost on restart");
            Ok(Arc::new(InMemoryAccountRepository::new(config.starting_currency)))
        }
        AccountStoreBackend::Sqlite => {
            let options = SqliteConnectOptions::from_str(&config.database_url)
                .context("DATABASE_URL is not a valid SQLite URL")?
                .create_if_missing(true);
            let pool = SqlitePoolOptions::new()
                .connect_with(options)
                .await
                .context("Failed to open SQLite database")?;
            let repository = SqliteAccountRepository::new(pool, config.starting_currency)
                .await
                .context("Failed to prepare accounts table")?;
            Ok(Arc::new(repository))
        }
    }
}
