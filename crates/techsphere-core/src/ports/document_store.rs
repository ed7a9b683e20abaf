//! Persistent document store port.
//!
//! Collections hold schemaless JSON documents addressed by `(collection, id)`.
//! Services convert between documents and typed entities.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RepositoryError;

/// A stored document together with its key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

/// Optional query constraints for [`DocumentStorePort::list`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentFilter {
    /// Top-level field that must equal `equals`.
    pub field: Option<String>,
    pub equals: Option<Value>,
    /// Maximum number of documents returned.
    pub limit: Option<usize>,
}

impl DocumentFilter {
    /// Match documents whose top-level `field` equals `value`.
    pub fn field_equals(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: Some(field.into()),
            equals: Some(value.into()),
            limit: None,
        }
    }

    /// Cap the number of returned documents.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether `data` satisfies the field constraint.
    pub fn matches(&self, data: &Value) -> bool {
        match (&self.field, &self.equals) {
            (Some(field), Some(expected)) => data.get(field) == Some(expected),
            _ => true,
        }
    }
}

/// Port for the remote document database.
///
/// # Design Rules
///
/// - `put` replaces the whole document (last-writer-wins, no merge)
/// - `delete` of a missing document is `RepositoryError::NotFound`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStorePort: Send + Sync {
    /// Fetch one document.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, RepositoryError>;

    /// List documents of a collection, oldest write first.
    async fn list(
        &self,
        collection: &str,
        filter: Option<DocumentFilter>,
    ) -> Result<Vec<Document>, RepositoryError>;

    /// Insert or replace a full document.
    async fn put(&self, collection: &str, id: &str, data: &Value) -> Result<(), RepositoryError>;

    /// Delete a document.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), RepositoryError>;
}
