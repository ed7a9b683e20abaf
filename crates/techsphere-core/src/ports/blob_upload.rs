//! Binary upload service port.

use async_trait::async_trait;

use crate::upload::UploadError;

/// Progress callback invoked with `(bytes_transferred, bytes_total)`.
///
/// Must be cheap and non-blocking; it runs on the transfer task.
pub type ProgressCallback = dyn Fn(u64, u64) + Send + Sync;

/// Port for the object storage service.
///
/// One call stores one object and resolves to its publicly retrievable URL.
#[async_trait]
pub trait BlobUploadPort: Send + Sync {
    /// Store `bytes` under `destination_key`, reporting progress as bytes move.
    async fn upload(
        &self,
        destination_key: &str,
        bytes: Vec<u8>,
        on_progress: &ProgressCallback,
    ) -> Result<String, UploadError>;
}
