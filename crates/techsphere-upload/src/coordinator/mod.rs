//! Upload coordinator implementation.
//!
//! This module provides the concrete implementation of `UploadCoordinatorPort`.
//!
//! # Architecture
//!
//! - **Coordinator**: Validates the request, spawns one worker per file and
//!   hands back the batch handle
//! - **Worker**: Runs one transfer, reports bytes through the batch context
//! - **Context**: Shared tracker, progress channel and event emission
//!
//! # Concurrency Model
//!
//! - Every file is spawned immediately; a per-batch `Semaphore` caps how many
//!   transfer at once
//! - Tasks are independent: a failure never cancels a sibling
//! - Dropping the handle does not cancel anything
//! - The progress channel closes when the last task settles

mod batch_tracker;
mod context;
mod worker;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Semaphore, oneshot, watch};
use tracing::debug;

use techsphere_core::ports::{BlobUploadPort, UploadCoordinatorPort, UploadEventEmitterPort};
use techsphere_core::settings::{
    DEFAULT_MAX_CONCURRENT_UPLOADS, DEFAULT_PROGRESS_INTERVAL_MS, Settings,
};
use techsphere_core::upload::{BatchId, UploadBatch, UploadBatchRequest, UploadError, UploadEvent};

use crate::progress::ProgressThrottle;

use context::BatchContext;
use worker::{UploadJob, WorkerDeps};

pub use batch_tracker::BatchTracker;

/// Configuration for the upload coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadCoordinatorConfig {
    /// Maximum simultaneous transfers per batch.
    pub max_concurrent: usize,
    /// Minimum interval between progress events.
    pub progress_interval: Duration,
}

impl UploadCoordinatorConfig {
    /// Derive the configuration from storefront settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            max_concurrent: settings.effective_max_concurrent_uploads(),
            progress_interval: settings.effective_progress_interval(),
        }
    }
}

impl Default for UploadCoordinatorConfig {
    fn default() -> Self {
        Self {
            max_concurrent: DEFAULT_MAX_CONCURRENT_UPLOADS as usize,
            progress_interval: Duration::from_millis(DEFAULT_PROGRESS_INTERVAL_MS),
        }
    }
}

/// Dependencies for building an upload coordinator.
pub struct UploadCoordinatorDeps<B, E>
where
    B: BlobUploadPort + 'static,
    E: UploadEventEmitterPort + 'static,
{
    /// Port for the object storage service.
    pub backend: Arc<B>,
    /// Port for emitting upload events.
    pub event_emitter: Arc<E>,
    pub config: UploadCoordinatorConfig,
}

/// Build an upload coordinator from its dependencies.
///
/// Returns an implementation of `UploadCoordinatorPort` that can be
/// stored as `Arc<dyn UploadCoordinatorPort>` in adapters.
pub fn build_upload_coordinator<B, E>(deps: UploadCoordinatorDeps<B, E>) -> UploadCoordinatorImpl
where
    B: BlobUploadPort + 'static,
    E: UploadEventEmitterPort + 'static,
{
    UploadCoordinatorImpl::new(deps.backend, deps.event_emitter, deps.config)
}

/// Concrete implementation of the upload coordinator.
pub struct UploadCoordinatorImpl {
    backend: Arc<dyn BlobUploadPort>,
    event_emitter: Arc<dyn UploadEventEmitterPort>,
    config: UploadCoordinatorConfig,
}

impl UploadCoordinatorImpl {
    /// Create a coordinator.
    pub fn new(
        backend: Arc<dyn BlobUploadPort>,
        event_emitter: Arc<dyn UploadEventEmitterPort>,
        config: UploadCoordinatorConfig,
    ) -> Self {
        Self {
            backend,
            event_emitter,
            config,
        }
    }

    /// Current configuration.
    pub const fn config(&self) -> &UploadCoordinatorConfig {
        &self.config
    }
}

#[async_trait]
impl UploadCoordinatorPort for UploadCoordinatorImpl {
    async fn upload_batch(&self, request: UploadBatchRequest) -> Result<UploadBatch, UploadError> {
        if let Some(file) = request
            .files
            .iter()
            .find(|f| f.destination_key.trim().is_empty())
        {
            return Err(UploadError::invalid_key(file.destination_key.clone()));
        }

        let batch_id = BatchId::generate();
        let tracker = BatchTracker::new(&request.files);
        let initial = tracker.snapshot();
        let task_count = request.files.len();
        let bytes_total = initial.bytes_total;
        let settled = tracker.is_settled();
        let (progress_tx, progress_rx) = watch::channel(initial);

        let ctx = Arc::new(BatchContext::new(
            batch_id.clone(),
            tracker,
            ProgressThrottle::new(self.config.progress_interval),
            progress_tx,
            Arc::clone(&self.event_emitter),
        ));
        let deps = WorkerDeps {
            backend: Arc::clone(&self.backend),
            permits: Arc::new(Semaphore::new(self.config.max_concurrent.max(1))),
        };

        debug!(
            target: "techsphere.upload",
            batch_id = %batch_id,
            files = task_count,
            bytes = bytes_total,
            max_concurrent = self.config.max_concurrent,
            "Starting upload batch"
        );
        self.event_emitter.emit(UploadEvent::BatchStarted {
            batch_id: batch_id.to_string(),
            task_count,
            bytes_total,
        });
        if settled {
            self.event_emitter.emit(UploadEvent::BatchCompleted {
                batch_id: batch_id.to_string(),
                urls: Vec::new(),
            });
        }

        let mut tasks = Vec::with_capacity(task_count);
        for (index, file) in request.files.into_iter().enumerate() {
            let (done_tx, done_rx) = oneshot::channel();
            tasks.push((file.destination_key.clone(), done_rx));
            tokio::spawn(worker::run_job(
                UploadJob { index, file },
                deps.clone(),
                Arc::clone(&ctx),
                done_tx,
            ));
        }

        Ok(UploadBatch::new(batch_id, progress_rx, tasks))
    }
}
