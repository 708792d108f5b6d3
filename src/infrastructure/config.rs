//! Application configuration

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::application::services::PacingConfig;
use crate::domain::aggregates::STARTING_CURRENCY;

/// Where accounts are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStoreBackend {
    Sqlite,
    Memory,
}

impl FromStr for AccountStoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => bail!("Unknown account store backend: {}", other),
        }
    }
}

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Ollama API base URL (OpenAI-compatible)
    pub ollama_base_url: String,
    /// Model used for dragon generation
    pub ollama_model: String,

    /// SQLite connection URL
    pub database_url: String,
    pub account_store: AccountStoreBackend,
    /// Currency granted at registration
    pub starting_currency: u64,

    /// Minimum time before a generated dragon is revealed
    pub presentation_floor: Duration,
    /// Hold between reveal and commit
    pub reveal_delay: Duration,

    /// Number of accounts on the leaderboard
    pub leaderboard_limit: usize,

    /// HTTP server port
    pub server_port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            ollama_base_url: env::var("OLLAMA_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434/v1".to_string()),
            ollama_model: env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.2".to_string()),

            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:dragon_hoard.db?mode=rwc".to_string()),
            account_store: env::var("ACCOUNT_STORE")
                .unwrap_or_else(|_| "sqlite".to_string())
                .parse()
                .context("ACCOUNT_STORE must be 'sqlite' or 'memory'")?,
            starting_currency: parse_var("STARTING_CURRENCY", STARTING_CURRENCY)
                .context("STARTING_CURRENCY must be a non-negative integer")?,

            presentation_floor: Duration::from_millis(
                parse_var("PRESENTATION_FLOOR_MS", 2000)
                    .context("PRESENTATION_FLOOR_MS must be a number of milliseconds")?,
            ),
            reveal_delay: Duration::from_millis(
                parse_var("REVEAL_DELAY_MS", 1000)
                    .context("REVEAL_DELAY_MS must be a number of milliseconds")?,
            ),

            leaderboard_limit: parse_positive("LEADERBOARD_LIMIT", 50)
                .context("LEADERBOARD_LIMIT must be a positive integer")?,

            server_port: parse_var("SERVER_PORT", 3000)
                .context("SERVER_PORT must be a valid port number")?,
        })
    }

    pub fn pacing(&self) -> PacingConfig {
        PacingConfig {
            presentation_floor: self.presentation_floor,
            reveal_delay: self.reveal_delay,
        }
    }
}

/// Parse an optional variable, falling back to `default` when unset
fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => Ok(raw.trim().parse()?),
        Err(_) => Ok(default),
    }
}

fn parse_positive(key: &str, default: usize) -> Result<usize> {
    let value = parse_var(key, default)?;
    if value == 0 {
        bail!("{} is zero", key);
    }
    Ok(value)
}
