//! Upload events - discriminated union for all batch state changes.

use serde::{Deserialize, Serialize};

/// Single discriminated union for all upload events.
///
/// ```text
/// type UploadEvent =
///   | { type: "batch_started"; batch_id; task_count; bytes_total }
///   | { type: "batch_progress"; batch_id; bytes_transferred; bytes_total; percent }
///   | { type: "task_completed"; batch_id; index; destination_key; url }
///   | { type: "task_failed"; batch_id; index; destination_key; error }
///   | { type: "batch_completed"; batch_id; urls }
///   | { type: "batch_failed"; batch_id; succeeded; failed };
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UploadEvent {
    /// Every task of the batch has been spawned.
    BatchStarted {
        batch_id: String,
        task_count: usize,
        bytes_total: u64,
    },

    /// Aggregate progress update (rate-limited).
    BatchProgress {
        batch_id: String,
        bytes_transferred: u64,
        bytes_total: u64,
        /// Progress percentage (0.0 - 100.0).
        percent: f64,
    },

    /// One task stored its object.
    TaskCompleted {
        batch_id: String,
        index: usize,
        destination_key: String,
        url: String,
    },

    /// One task failed. Siblings keep running.
    TaskFailed {
        batch_id: String,
        index: usize,
        destination_key: String,
        error: String,
    },

    /// Every task succeeded. URLs are in request order.
    BatchCompleted { batch_id: String, urls: Vec<String> },

    /// Every task settled and at least one failed.
    BatchFailed {
        batch_id: String,
        succeeded: usize,
        failed: usize,
    },
}

impl UploadEvent {
    /// The batch this event belongs to.
    pub fn batch_id(&self) -> &str {
        match self {
            Self::BatchStarted { batch_id, .. }
            | Self::BatchProgress { batch_id, .. }
            | Self::TaskCompleted { batch_id, .. }
            | Self::TaskFailed { batch_id, .. }
            | Self::BatchCompleted { batch_id, .. }
            | Self::BatchFailed { batch_id, .. } => batch_id,
        }
    }

    /// Whether this is the last event of a batch.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::BatchCompleted { .. } | Self::BatchFailed { .. })
    }
}
