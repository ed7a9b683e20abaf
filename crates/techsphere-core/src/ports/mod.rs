//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - No filesystem or network implementation details
//! - Stores deal in JSON documents and strings; typing happens in services

pub mod blob_upload;
pub mod document_store;
pub mod session_store;
pub mod settings_repository;
pub mod upload_coordinator;
pub mod upload_event_emitter;

use std::sync::Arc;

use thiserror::Error;

use crate::domain::CartError;
use crate::upload::UploadError;

pub use blob_upload::{BlobUploadPort, ProgressCallback};
pub use document_store::{Document, DocumentFilter, DocumentStorePort};
pub use session_store::SessionStorePort;
pub use settings_repository::SettingsRepository;
pub use upload_coordinator::UploadCoordinatorPort;
pub use upload_event_emitter::{NoopUploadEmitter, UploadEventEmitterPort};

/// Container for the storage trait objects.
///
/// Lives in the core so that composition roots can pass storage around
/// without depending on `techsphere-db`.
#[derive(Clone)]
pub struct Repos {
    /// Catalog documents (products, banners).
    pub documents: Arc<dyn DocumentStorePort>,
    /// Durable session key/value storage (cart).
    pub sessions: Arc<dyn SessionStorePort>,
    /// Storefront settings.
    pub settings: Arc<dyn SettingsRepository>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(
        documents: Arc<dyn DocumentStorePort>,
        sessions: Arc<dyn SessionStorePort>,
        settings: Arc<dyn SettingsRepository>,
    ) -> Self {
        Self {
            documents,
            sessions,
            settings,
        }
    }
}

/// Storage failure as seen by services; backend error types stay in the adapters.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Core error type for semantic domain errors.
///
/// This is the canonical error type used across the core domain.
/// Adapters should map this to their own error types (CLI exit codes,
/// serialized API errors).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Settings validation error.
    #[error(transparent)]
    Settings(#[from] crate::settings::SettingsError),

    /// Cart input was rejected.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Validation error (invalid input).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The entity to update or delete does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An asset transfer failed; nothing was written.
    #[error("Upload of '{asset}' failed: {source}")]
    Transfer {
        /// Label of the asset that failed.
        asset: String,
        #[source]
        source: UploadError,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error (unexpected condition).
    #[error("Internal error: {0}")]
    Internal(String),
}
