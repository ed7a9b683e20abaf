//! Shared state of one running batch.
//!
//! Tasks report into the context from their progress callbacks, which are
//! synchronous, so the tracker sits behind a `std::sync::Mutex` that is
//! never held across an await. Events are emitted and snapshots published
//! while the lock is held, so both are seen in tracker order.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{info, warn};

use techsphere_core::ports::UploadEventEmitterPort;
use techsphere_core::upload::{BatchId, BatchProgress, UploadError, UploadEvent};

use super::batch_tracker::BatchTracker;
use crate::progress::ProgressThrottle;

pub(super) struct BatchContext {
    batch_id: BatchId,
    tracker: Mutex<BatchTracker>,
    throttle: Mutex<ProgressThrottle>,
    progress_tx: watch::Sender<BatchProgress>,
    emitter: Arc<dyn UploadEventEmitterPort>,
}

impl BatchContext {
    pub(super) fn new(
        batch_id: BatchId,
        tracker: BatchTracker,
        throttle: ProgressThrottle,
        progress_tx: watch::Sender<BatchProgress>,
        emitter: Arc<dyn UploadEventEmitterPort>,
    ) -> Self {
        Self {
            batch_id,
            tracker: Mutex::new(tracker),
            throttle: Mutex::new(throttle),
            progress_tx,
            emitter,
        }
    }

    pub(super) const fn batch_id(&self) -> &BatchId {
        &self.batch_id
    }

    pub(super) fn mark_started(&self, index: usize) {
        let mut tracker = self.tracker();
        tracker.mark_started(index);
        self.progress_tx.send_replace(tracker.snapshot());
    }

    pub(super) fn on_progress(&self, index: usize, transferred: u64, total: u64) {
        let mut tracker = self.tracker();
        if !tracker.record_progress(index, transferred, total) {
            return;
        }
        let snapshot = tracker.snapshot();

        if self.throttle().admit() {
            self.emit_progress(&snapshot);
        }
        self.progress_tx.send_replace(snapshot);
    }

    /// Record a task outcome; emits the terminal event when the batch settles.
    ///
    /// Events are emitted before the snapshot is published, so an observer
    /// that sees a settled batch has already been sent every event.
    pub(super) fn finish(&self, index: usize, result: &Result<String, UploadError>) {
        let mut tracker = self.tracker();
        match result {
            Ok(url) => tracker.record_success(index, url.clone()),
            Err(error) => tracker.record_failure(index, error),
        }
        let snapshot = tracker.snapshot();

        let destination_key = snapshot
            .tasks
            .get(index)
            .map(|t| t.destination_key.clone())
            .unwrap_or_default();
        let batch_id = self.batch_id.to_string();

        match result {
            Ok(url) => self.emitter.emit(UploadEvent::TaskCompleted {
                batch_id: batch_id.clone(),
                index,
                destination_key,
                url: url.clone(),
            }),
            Err(error) => {
                warn!(
                    target: "techsphere.upload",
                    batch_id = %self.batch_id,
                    index,
                    key = %destination_key,
                    error = %error,
                    "Transfer failed"
                );
                self.emitter.emit(UploadEvent::TaskFailed {
                    batch_id: batch_id.clone(),
                    index,
                    destination_key,
                    error: error.to_string(),
                });
            }
        }
        self.emit_progress(&snapshot);

        if tracker.is_complete() {
            let urls = tracker.urls();
            info!(
                target: "techsphere.upload",
                batch_id = %self.batch_id,
                files = urls.len(),
                bytes = snapshot.bytes_total,
                coalesced = self.throttle().skipped(),
                "Batch completed"
            );
            self.emitter
                .emit(UploadEvent::BatchCompleted { batch_id, urls });
        } else if tracker.is_settled() {
            let failed = snapshot.failed();
            let succeeded = snapshot.succeeded();
            warn!(
                target: "techsphere.upload",
                batch_id = %self.batch_id,
                succeeded,
                failed,
                "Batch finished with failures"
            );
            self.emitter.emit(UploadEvent::BatchFailed {
                batch_id,
                succeeded,
                failed,
            });
        }

        self.progress_tx.send_replace(snapshot);
    }

    fn emit_progress(&self, snapshot: &BatchProgress) {
        self.emitter.emit(UploadEvent::BatchProgress {
            batch_id: self.batch_id.to_string(),
            bytes_transferred: snapshot.bytes_transferred,
            bytes_total: snapshot.bytes_total,
            percent: snapshot.percent,
        });
    }

    fn tracker(&self) -> MutexGuard<'_, BatchTracker> {
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn throttle(&self) -> MutexGuard<'_, ProgressThrottle> {
        self.throttle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
