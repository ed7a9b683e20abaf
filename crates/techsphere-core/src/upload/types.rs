//! Upload identifiers, requests and progress snapshots.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Aggregate progress never reaches this value until every task succeeded.
pub const COMPLETE_PERCENT: f64 = 100.0;

/// Ceiling for aggregate progress while any task is unresolved.
pub const MAX_IN_FLIGHT_PERCENT: f64 = 99.9;

/// Unique identifier for an upload batch.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(String);

impl BatchId {
    /// Create a batch id from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random batch id.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string reference.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Build the storage key for an uploaded file: `<prefix>/<millis>_<tag>_<file name>`.
///
/// `tag` must differ between files uploaded in the same millisecond; callers
/// pass a short random token. Path separators in the file name are replaced
/// so the key always has exactly one level below the prefix.
pub fn destination_key(prefix: &str, file_name: &str, unix_millis: i64, tag: &str) -> String {
    let safe_name: String = file_name
        .trim()
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("{}/{unix_millis}_{tag}_{safe_name}", prefix.trim_matches('/'))
}

/// One file in an upload batch.
#[derive(Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// Key the storage service stores the object under.
    pub destination_key: String,
    /// Raw bytes.
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Create a new upload file.
    pub fn new(destination_key: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            destination_key: destination_key.into(),
            bytes,
        }
    }
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("destination_key", &self.destination_key)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A batch of files to upload concurrently.
#[derive(Debug, Clone, Default)]
pub struct UploadBatchRequest {
    pub files: Vec<UploadFile>,
}

impl UploadBatchRequest {
    /// Create a request from a list of files.
    pub const fn new(files: Vec<UploadFile>) -> Self {
        Self { files }
    }
}

/// Lifecycle of a single upload task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadStatus {
    /// Waiting for a transfer slot.
    Pending,
    /// Bytes are being transferred.
    InProgress,
    /// Stored; a URL is available.
    Succeeded,
    /// Transfer failed.
    Failed,
}

impl UploadStatus {
    /// Whether the task has reached a final state.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Point-in-time view of one task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadTaskSnapshot {
    /// Position in the batch request.
    pub index: usize,
    pub destination_key: String,
    pub bytes_transferred: u64,
    pub bytes_total: u64,
    pub status: UploadStatus,
    /// Set once the task succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Set once the task failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate progress of a batch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchProgress {
    /// `Σ bytes_transferred` over all tasks.
    pub bytes_transferred: u64,
    /// `Σ bytes_total` over all tasks.
    pub bytes_total: u64,
    /// Aggregate percentage in `[0, 100]`, monotonically non-decreasing.
    pub percent: f64,
    /// Per-task state, in request order.
    pub tasks: Vec<UploadTaskSnapshot>,
}

impl BatchProgress {
    /// Number of tasks that succeeded.
    pub fn succeeded(&self) -> usize {
        self.count(UploadStatus::Succeeded)
    }

    /// Number of tasks that failed.
    pub fn failed(&self) -> usize {
        self.count(UploadStatus::Failed)
    }

    /// Every task reached a terminal state.
    pub fn is_settled(&self) -> bool {
        self.tasks.iter().all(|t| t.status.is_terminal())
    }

    /// Every task succeeded.
    pub fn is_complete(&self) -> bool {
        self.tasks
            .iter()
            .all(|t| t.status == UploadStatus::Succeeded)
    }

    fn count(&self, status: UploadStatus) -> usize {
        self.tasks.iter().filter(|t| t.status == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_key_format() {
        assert_eq!(
            destination_key("products", "speaker.png", 1_700_000_000_000, "3f2a9c01"),
            "products/1700000000000_3f2a9c01_speaker.png"
        );
    }

    #[test]
    fn test_destination_key_flattens_separators() {
        assert_eq!(
            destination_key("/banners/", "../a/b.png", 1, "t"),
            "banners/1_t_.._a_b.png"
        );
    }

    #[test]
    fn test_empty_progress_is_complete() {
        let progress = BatchProgress::default();
        assert!(progress.is_settled());
        assert!(progress.is_complete());
        assert_eq!(progress.succeeded(), 0);
    }

    #[test]
    fn test_status_terminal() {
        assert!(!UploadStatus::Pending.is_terminal());
        assert!(!UploadStatus::InProgress.is_terminal());
        assert!(UploadStatus::Succeeded.is_terminal());
        assert!(UploadStatus::Failed.is_terminal());
    }
}
