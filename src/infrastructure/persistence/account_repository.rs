use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::application::ports::outbound::{AccountStoreError, AccountStorePort};
use crate::domain::aggregates::AccountSnapshot;
use crate::domain::entities::Creature;

type AccountRow = (String, i64, i64, String);

pub struct SqliteAccountRepository {
    pool: SqlitePool,
    starting_currency: u64,
}

impl SqliteAccountRepository {
    pub async fn new(pool: SqlitePool, starting_currency: u64) -> Result<Self, sqlx::Error> {
        // Create table if not exists
        sqlx::query(r#"
            CREATE TABLE IF NOT EXISTS accounts (
                username TEXT PRIMARY KEY,
                password TEXT NOT NULL,
                currency INTEGER NOT NULL,
                experience INTEGER NOT NULL,
                collection TEXT NOT NULL,
                created_at TIMESTAMP NOT NULL
            )
        "#).execute(&pool).await?;

        Ok(Self {
            pool,
            starting_currency,
        })
    }

    /// Stored password and account row, if the username exists
    async fn fetch_row(&self, username: &str) -> Result<Option<(String, AccountRow)>, AccountStoreError> {
        let row: Option<(String, String, i64, i64, String)> = sqlx::query_as(
            "SELECT password, username, currency, experience, collection FROM accounts WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountStoreError::Database(e.to_string()))?;

        Ok(row.map(|(password, username, currency, experience, collection)| {
            (password, (username, currency, experience, collection))
        }))
    }
}

fn to_column(value: u64) -> Result<i64, AccountStoreError> {
    i64::try_from(value).map_err(|_| AccountStoreError::Serialization(format!("{} out of range", value)))
}

fn from_column(value: i64) -> Result<u64, AccountStoreError> {
    u64::try_from(value).map_err(|_| AccountStoreError::Serialization(format!("{} is negative", value)))
}

fn snapshot_from_row(row: AccountRow) -> Result<AccountSnapshot, AccountStoreError> {
    let (username, currency, experience, collection) = row;
    let collection: Vec<Creature> = serde_json::from_str(&collection)
        .map_err(|e| AccountStoreError::Serialization(e.to_string()))?;

    Ok(AccountSnapshot {
        username,
        currency: from_column(currency)?,
        experience: from_column(experience)?,
        collection,
    })
}

#[async_trait]
impl AccountStorePort for SqliteAccountRepository {
    async fn load(&self, username: &str, password: &str) -> Result<AccountSnapshot, AccountStoreError> {
        let (stored_password, row) = self
            .fetch_row(username)
            .await?
            .ok_or(AccountStoreError::NotFound)?;

        if stored_password != password {
            return Err(AccountStoreError::BadCredentials);
        }
        snapshot_from_row(row)
    }

    async fn create(&self, username: &str, password: &str) -> Result<AccountSnapshot, AccountStoreError> {
        let snapshot = AccountSnapshot::fresh(username, self.starting_currency);

        let result = sqlx::query(
            "INSERT OR IGNORE INTO accounts (username, password, currency, experience, collection, created_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(username)
        .bind(password)
        .bind(to_column(snapshot.currency)?)
        .bind(to_column(snapshot.experience)?)
        .bind("[]")
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| AccountStoreError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::AlreadyExists);
        }
        Ok(snapshot)
    }

    async fn persist(&self, snapshot: &AccountSnapshot) -> Result<(), AccountStoreError> {
        let collection = serde_json::to_string(&snapshot.collection)
            .map_err(|e| AccountStoreError::Serialization(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE accounts SET currency = ?, experience = ?, collection = ? WHERE username = ?",
        )
        .bind(to_column(snapshot.currency)?)
        .bind(to_column(snapshot.experience)?)
        .bind(collection)
        .bind(&snapshot.username)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountStoreError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountStoreError::NotFound);
        }
        Ok(())
    }

    async fn list_ranked(&self, limit: usize) -> Result<Vec<AccountSnapshot>, AccountStoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows: Vec<AccountRow> = sqlx::query_as(
            "SELECT username, currency, experience, collection FROM accounts ORDER BY experience DESC, created_at ASC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AccountStoreError::Database(e.to_string()))?;

        rows.into_iter().map(snapshot_from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{Element, Rarity};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn repository() -> SqliteAccountRepository {
        // A single connection keeps every query on the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        SqliteAccountRepository::new(pool, 500).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_login() {
        let repo = repository().await;

        let created = repo.create("ember", "secret").await.unwrap();
        assert_eq!(created.currency, 500);
        assert_eq!(created.experience, 0);
        assert!(created.collection.is_empty());

        assert!(matches!(repo.create("ember", "other").await, Err(AccountStoreError::AlreadyExists)));
        assert!(matches!(repo.load("ember", "wrong").await, Err(AccountStoreError::BadCredentials)));
        assert!(matches!(repo.load("nobody", "secret").await, Err(AccountStoreError::NotFound)));
        assert_eq!(repo.load("ember", "secret").await.unwrap(), created);
    }

    #[tokio::test]
    async fn test_persist_round_trip_preserves_order() {
        let repo = repository().await;
        repo.create("ember", "secret").await.unwrap();

        let snapshot = AccountSnapshot {
            username: "ember".to_string(),
            currency: 1234,
            experience: 2500,
            collection: vec![
                Creature::new("Ashking", Rarity::Golden, Element::Tyrant)
                    .with_description("Crowned in smoke")
                    .with_tags(vec!["Crown".to_string()]),
                Creature::new("Cinder", Rarity::Wooden, Element::Fire),
                Creature::new("Voltfang", Rarity::Iron, Element::Energy),
            ],
        };
        repo.persist(&snapshot).await.unwrap();

        let loaded = repo.load("ember", "secret").await.unwrap();
        assert_eq!(loaded, snapshot);
    }

    #[tokio::test]
    async fn test_persist_unknown_account() {
        let repo = repository().await;
        let snapshot = AccountSnapshot::fresh("ghost", 10);
        assert!(matches!(repo.persist(&snapshot).await, Err(AccountStoreError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_ranked_by_experience() {
        let repo = repository().await;
        for (name, xp) in [("low", 10), ("high", 5000), ("mid", 1200)] {
            repo.create(name, "pw").await.unwrap();
            let mut snapshot = AccountSnapshot::fresh(name, 500);
            snapshot.experience = xp;
            repo.persist(&snapshot).await.unwrap();
        }

        let ranked = repo.list_ranked(2).await.unwrap();
        let names: Vec<&str> = ranked.iter().map(|s| s.username.as_str()).collect();
        assert_eq!(names, vec!["high", "mid"]);
    }
}
