//! Upload worker.
//!
//! One worker runs per file. It waits for a transfer slot, drives the
//! backend, records the outcome in the shared batch context and only then
//! delivers the result to the handle, so a handle that observes a failure
//! also observes every success recorded before it.

use std::sync::Arc;

use tokio::sync::{Semaphore, oneshot};
use tracing::debug;

use techsphere_core::ports::BlobUploadPort;
use techsphere_core::upload::{UploadError, UploadFile};

use super::context::BatchContext;

/// One file of a batch, by value.
pub struct UploadJob {
    /// Position in the batch request.
    pub index: usize,
    pub file: UploadFile,
}

/// Dependencies for the upload worker.
#[derive(Clone)]
pub struct WorkerDeps {
    pub backend: Arc<dyn BlobUploadPort>,
    pub permits: Arc<Semaphore>,
}

/// Run a job to completion and deliver its result.
pub(super) async fn run_job(
    job: UploadJob,
    deps: WorkerDeps,
    ctx: Arc<BatchContext>,
    done: oneshot::Sender<Result<String, UploadError>>,
) {
    let UploadJob { index, file } = job;
    let result = execute(index, file, &deps, &ctx).await;

    ctx.finish(index, &result);
    // The handle may have been dropped; the transfer still counted.
    let _ = done.send(result);
}

async fn execute(
    index: usize,
    file: UploadFile,
    deps: &WorkerDeps,
    ctx: &Arc<BatchContext>,
) -> Result<String, UploadError> {
    let Ok(permit) = deps.permits.clone().acquire_owned().await else {
        return Err(UploadError::Aborted);
    };

    ctx.mark_started(index);
    debug!(
        target: "techsphere.upload",
        batch_id = %ctx.batch_id(),
        index,
        key = %file.destination_key,
        bytes = file.bytes.len(),
        "Transfer started"
    );

    let progress_ctx = Arc::clone(ctx);
    let on_progress = move |transferred: u64, total: u64| {
        progress_ctx.on_progress(index, transferred, total);
    };

    let result = deps
        .backend
        .upload(&file.destination_key, file.bytes, &on_progress)
        .await;
    drop(permit);
    result
}
