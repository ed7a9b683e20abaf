//! Handle to an in-flight upload batch.
//!
//! A batch exposes two views:
//!
//! - a progress channel (`watch`) carrying the aggregate [`BatchProgress`],
//!   which closes once every task has settled
//! - one result per task, delivered over `oneshot` channels
//!
//! Dropping the handle does not cancel anything; the transfers keep running
//! until they settle on their own.

use futures_util::stream::{FuturesUnordered, Stream, StreamExt};
use thiserror::Error;
use tokio::sync::{oneshot, watch};
use tokio_stream::wrappers::WatchStream;

use super::errors::UploadError;
use super::types::{BatchId, BatchProgress, UploadStatus};

/// Receiving half of one task's result.
pub type TaskResultReceiver = oneshot::Receiver<Result<String, UploadError>>;

/// A task that already succeeded when the batch failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedUpload {
    pub index: usize,
    pub destination_key: String,
    pub url: String,
}

/// First failure observed by [`UploadBatch::wait`].
#[derive(Debug, Clone, Error)]
#[error("Upload of '{destination_key}' failed: {error}")]
pub struct BatchFailure {
    /// Position of the failed file in the request.
    pub index: usize,
    pub destination_key: String,
    #[source]
    pub error: UploadError,
    /// Tasks that had already succeeded, in request order.
    pub completed: Vec<CompletedUpload>,
}

/// Final result of one task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskOutcome {
    pub index: usize,
    pub destination_key: String,
    pub result: Result<String, UploadError>,
}

struct PendingTask {
    index: usize,
    destination_key: String,
    result: TaskResultReceiver,
}

/// Handle returned by the upload coordinator.
pub struct UploadBatch {
    id: BatchId,
    progress: watch::Receiver<BatchProgress>,
    tasks: Vec<PendingTask>,
}

impl UploadBatch {
    /// Assemble a handle. `tasks` are `(destination_key, receiver)` in request order.
    pub fn new(
        id: BatchId,
        progress: watch::Receiver<BatchProgress>,
        tasks: Vec<(String, TaskResultReceiver)>,
    ) -> Self {
        let tasks = tasks
            .into_iter()
            .enumerate()
            .map(|(index, (destination_key, result))| PendingTask {
                index,
                destination_key,
                result,
            })
            .collect();
        Self {
            id,
            progress,
            tasks,
        }
    }

    /// Batch identifier.
    pub const fn id(&self) -> &BatchId {
        &self.id
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the batch has no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Latest aggregate progress.
    pub fn snapshot(&self) -> BatchProgress {
        self.progress.borrow().clone()
    }

    /// A new receiver for progress changes.
    pub fn progress(&self) -> watch::Receiver<BatchProgress> {
        self.progress.clone()
    }

    /// Finite stream of progress snapshots.
    ///
    /// Yields the current snapshot first, then every change; ends when the
    /// batch has settled. The stream cannot be restarted.
    pub fn progress_stream(&self) -> impl Stream<Item = BatchProgress> + Send + 'static {
        WatchStream::new(self.progress.clone())
    }

    /// Wait for every URL, failing on the first task failure.
    ///
    /// URLs are returned in request order. Remaining tasks keep running after
    /// a failure.
    pub async fn wait(self) -> Result<Vec<String>, BatchFailure> {
        let Self {
            progress, tasks, ..
        } = self;

        let mut urls: Vec<Option<String>> = vec![None; tasks.len()];
        let mut pending: FuturesUnordered<_> = tasks.into_iter().map(recv_task).collect();

        while let Some(outcome) = pending.next().await {
            match outcome.result {
                Ok(url) => urls[outcome.index] = Some(url),
                Err(error) => {
                    let completed = completed_from(&progress.borrow(), &urls);
                    return Err(BatchFailure {
                        index: outcome.index,
                        destination_key: outcome.destination_key,
                        error,
                        completed,
                    });
                }
            }
        }

        Ok(urls.into_iter().flatten().collect())
    }

    /// Wait for every task to settle, successful or not.
    pub async fn settle(self) -> Vec<TaskOutcome> {
        let mut outcomes: Vec<TaskOutcome> = self
            .tasks
            .into_iter()
            .map(recv_task)
            .collect::<FuturesUnordered<_>>()
            .collect()
            .await;
        outcomes.sort_by_key(|o| o.index);
        outcomes
    }
}

impl std::fmt::Debug for UploadBatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadBatch")
            .field("id", &self.id)
            .field("tasks", &self.tasks.len())
            .finish_non_exhaustive()
    }
}

async fn recv_task(task: PendingTask) -> TaskOutcome {
    let result = task.result.await.unwrap_or(Err(UploadError::Aborted));
    TaskOutcome {
        index: task.index,
        destination_key: task.destination_key,
        result,
    }
}

/// Successes known either from results already received or from the tracker.
fn completed_from(progress: &BatchProgress, received: &[Option<String>]) -> Vec<CompletedUpload> {
    let mut completed: Vec<CompletedUpload> = progress
        .tasks
        .iter()
        .filter(|t| t.status == UploadStatus::Succeeded)
        .filter_map(|t| {
            t.url.clone().map(|url| CompletedUpload {
                index: t.index,
                destination_key: t.destination_key.clone(),
                url,
            })
        })
        .collect();

    for (index, url) in received.iter().enumerate() {
        let Some(url) = url else { continue };
        if !completed.iter().any(|c| c.index == index) {
            let destination_key = progress
                .tasks
                .get(index)
                .map(|t| t.destination_key.clone())
                .unwrap_or_default();
            completed.push(CompletedUpload {
                index,
                destination_key,
                url: url.clone(),
            });
        }
    }

    completed.sort_by_key(|c| c.index);
    completed
}
