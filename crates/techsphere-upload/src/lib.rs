//! Upload coordinator for the TechSphere storefront.
//!
//! Implements [`UploadCoordinatorPort`]: every file of a batch becomes an
//! independent transfer task, progress is aggregated into a single
//! monotonically non-decreasing percentage, and per-file results are handed
//! back through an [`UploadBatch`] handle.
//!
//! # Modules
//!
//! - `coordinator` - Batch orchestration, per-batch tracker and transfer worker
//! - `progress` - Rate-limiting for progress events
//! - `backend` - Binary upload service adapters (`FsBlobStore`)

// Re-export core types for convenience
pub use techsphere_core::ports::{
    BlobUploadPort, NoopUploadEmitter, ProgressCallback, UploadCoordinatorPort,
    UploadEventEmitterPort,
};
pub use techsphere_core::upload::{
    BatchFailure, BatchId, BatchProgress, UploadBatch, UploadBatchRequest, UploadError,
    UploadEvent, UploadFile, UploadStatus,
};

pub(crate) mod progress;
pub use progress::ProgressThrottle;

mod coordinator;
pub use coordinator::{
    BatchTracker, UploadCoordinatorConfig, UploadCoordinatorDeps, UploadCoordinatorImpl,
    build_upload_coordinator,
};

pub mod backend;
pub use backend::{FsBlobStore, KeyError};
