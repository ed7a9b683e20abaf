//! Durable session key/value storage port.

use async_trait::async_trait;

use super::RepositoryError;

/// String key/value storage scoped to the shopper's session.
///
/// Backs the cart. Values are opaque strings; callers own the encoding.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStorePort: Send + Sync {
    /// Read a value, `None` if the key was never written.
    async fn read(&self, key: &str) -> Result<Option<String>, RepositoryError>;

    /// Overwrite a value.
    async fn write(&self, key: &str, value: &str) -> Result<(), RepositoryError>;
}
