//! `SQLite` implementation of the `DocumentStorePort` trait.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{Row, SqlitePool};
use tracing::{debug, warn};

use techsphere_core::{Document, DocumentFilter, DocumentStorePort, RepositoryError};

use super::{now_timestamp, storage_error};

/// `SQLite` implementation of the `DocumentStorePort` trait.
///
/// Documents are stored as JSON text keyed by `(collection, id)`. Listing
/// follows rowid order, so a document keeps its position when replaced.
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    /// Create a new `SQLite` document store.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn decode(collection: &str, id: &str, raw: &str) -> Result<Value, RepositoryError> {
    serde_json::from_str(raw).map_err(|e| {
        RepositoryError::Serialization(format!("{collection}/{id}: {e}"))
    })
}

#[async_trait]
impl DocumentStorePort for SqliteDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, RepositoryError> {
        let row = sqlx::query("SELECT data FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.map(|r| {
            let raw: String = r.get("data");
            decode(collection, id, &raw)
        })
        .transpose()
    }

    async fn list(
        &self,
        collection: &str,
        filter: Option<DocumentFilter>,
    ) -> Result<Vec<Document>, RepositoryError> {
        let rows = sqlx::query("SELECT id, data FROM documents WHERE collection = ? ORDER BY rowid")
            .bind(collection)
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        let filter = filter.unwrap_or_default();
        let limit = filter.limit.unwrap_or(usize::MAX);
        let mut documents = Vec::new();

        for row in rows {
            if documents.len() >= limit {
                break;
            }
            let id: String = row.get("id");
            let raw: String = row.get("data");
            let data = match decode(collection, &id, &raw) {
                Ok(data) => data,
                Err(e) => {
                    warn!(target: "techsphere.db", collection, id = %id, error = %e, "Skipping unreadable document");
                    continue;
                }
            };
            if filter.matches(&data) {
                documents.push(Document { id, data });
            }
        }

        Ok(documents)
    }

    async fn put(&self, collection: &str, id: &str, data: &Value) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(data)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(collection, id) DO UPDATE SET
                data = excluded.data,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(&json)
        .bind(now_timestamp())
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        debug!(target: "techsphere.db", collection, id, "Document written");
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("{collection}/{id}")));
        }

        debug!(target: "techsphere.db", collection, id, "Document deleted");
        Ok(())
    }
}
