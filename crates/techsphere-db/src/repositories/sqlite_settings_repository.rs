//! Settings record kept as one JSON row in `settings_kv`.

use async_trait::async_trait;
use sqlx::SqlitePool;

use techsphere_core::{RepositoryError, Settings, SettingsRepository};

use super::{now_timestamp, storage_error};

const SETTINGS_KEY: &str = "storefront_settings";

pub struct SqliteSettingsRepository {
    pool: SqlitePool,
}

impl SqliteSettingsRepository {
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn serialization_error(err: &serde_json::Error) -> RepositoryError {
    RepositoryError::Serialization(format!("settings record: {err}"))
}

#[async_trait]
impl SettingsRepository for SqliteSettingsRepository {
    async fn load(&self) -> Result<Settings, RepositoryError> {
        let stored: Option<String> =
            sqlx::query_scalar("SELECT value FROM settings_kv WHERE key = ?")
                .bind(SETTINGS_KEY)
                .fetch_optional(&self.pool)
                .await
                .map_err(storage_error)?;

        stored.map_or_else(
            || Ok(Settings::with_defaults()),
            |json| serde_json::from_str(&json).map_err(|e| serialization_error(&e)),
        )
    }

    async fn save(&self, settings: &Settings) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(settings).map_err(|e| serialization_error(&e))?;

        sqlx::query(
            "INSERT INTO settings_kv (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(SETTINGS_KEY)
        .bind(json)
        .bind(now_timestamp())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(())
    }
}
