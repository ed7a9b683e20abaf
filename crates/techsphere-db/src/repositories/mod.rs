//! Repository implementations using `SQLite`.
//!
//! These implementations encapsulate all SQL queries and database access.
//! The `SqlitePool` is confined to this module and never exposed through
//! the port trait signatures.

mod sqlite_document_store;
mod sqlite_session_store;
mod sqlite_settings_repository;

pub use sqlite_document_store::SqliteDocumentStore;
pub use sqlite_session_store::SqliteSessionStore;
pub use sqlite_settings_repository::SqliteSettingsRepository;

use techsphere_core::RepositoryError;

/// Timestamp format stored in `updated_at` columns.
pub(crate) fn now_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

pub(crate) fn storage_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Storage(e.to_string())
}
