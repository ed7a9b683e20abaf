//! Upload coordinator port.

use async_trait::async_trait;

use crate::upload::{UploadBatch, UploadBatchRequest, UploadError};

/// Starts concurrent transfers and hands back a batch handle.
///
/// Implementations must:
/// - start every task immediately (subject to a concurrency cap)
/// - keep tasks independent: one failure never cancels a sibling
/// - let transfers finish in the background if the handle is dropped
#[async_trait]
pub trait UploadCoordinatorPort: Send + Sync {
    /// Start a batch.
    ///
    /// Fails up front only for request-level problems (e.g. an invalid key);
    /// per-file failures are reported through the returned handle.
    async fn upload_batch(&self, request: UploadBatchRequest) -> Result<UploadBatch, UploadError>;
}
