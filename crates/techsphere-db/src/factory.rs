//! Composition utilities for wiring the storefront with `SQLite` backends.
//!
//! Construction only; no domain logic lives here.

use sqlx::SqlitePool;
use std::sync::Arc;

use techsphere_core::Repos;

use crate::repositories::{SqliteDocumentStore, SqliteSessionStore, SqliteSettingsRepository};

/// Factory for creating repository instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Create a `SQLite` connection pool.
    ///
    /// # Arguments
    ///
    /// * `db_url` - `SQLite` connection URL (e.g., "sqlite:/var/lib/techsphere/techsphere.db")
    pub async fn create_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
        let pool = SqlitePool::connect(db_url).await?;
        Ok(pool)
    }

    /// Build all `SQLite` repositories from a pool.
    ///
    /// Returns a `Repos` struct from `techsphere-core` containing
    /// trait-object-wrapped repositories.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Self::document_store(pool.clone()),
            Self::session_store(pool.clone()),
            Self::settings_repository(pool),
        )
    }

    /// Create a document store from a pool.
    pub fn document_store(pool: SqlitePool) -> Arc<SqliteDocumentStore> {
        Arc::new(SqliteDocumentStore::new(pool))
    }

    /// Create a session store from a pool.
    pub fn session_store(pool: SqlitePool) -> Arc<SqliteSessionStore> {
        Arc::new(SqliteSessionStore::new(pool))
    }

    /// Create a settings repository from a pool.
    pub fn settings_repository(pool: SqlitePool) -> Arc<SqliteSettingsRepository> {
        Arc::new(SqliteSettingsRepository::new(pool))
    }
}

/// Test database helper for integration tests.
///
/// Provides an in-memory `SQLite` database with the production schema.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    /// Get the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Build every repository over this database.
    pub fn repos(&self) -> Repos {
        CoreFactory::build_repos(self.pool.clone())
    }
}
