//! `SQLite` implementation of the `SessionStorePort` trait.

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};

use techsphere_core::{RepositoryError, SessionStorePort};

use super::{now_timestamp, storage_error};

/// Session key/value storage in the `session_kv` table.
pub struct SqliteSessionStore {
    pool: SqlitePool,
}

impl SqliteSessionStore {
    /// Create a new `SQLite` session store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStorePort for SqliteSessionStore {
    async fn read(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM session_kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(row.map(|r| r.get("value")))
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        sqlx::query("INSERT OR REPLACE INTO session_kv (key, value, updated_at) VALUES (?, ?, ?)")
            .bind(key)
            .bind(value)
            .bind(now_timestamp())
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(())
    }
}
