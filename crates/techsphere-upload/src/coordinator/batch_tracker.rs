//! Per-batch progress tracker.
//!
//! A pure state machine that accumulates per-task byte counts and outcomes
//! and derives the aggregate percentage. No I/O or locking happens here; the
//! coordinator wraps it in a mutex shared by the batch's tasks.
//!
//! INVARIANT: the reported percentage never decreases, and it reaches
//! [`COMPLETE_PERCENT`] only once every task has succeeded.

use techsphere_core::upload::{
    BatchProgress, COMPLETE_PERCENT, MAX_IN_FLIGHT_PERCENT, UploadError, UploadFile, UploadStatus,
    UploadTaskSnapshot,
};

/// Aggregate state of one upload batch.
#[derive(Debug, Clone)]
pub struct BatchTracker {
    tasks: Vec<UploadTaskSnapshot>,
    percent: f64,
}

impl BatchTracker {
    /// Start tracking `files`, all pending.
    pub fn new(files: &[UploadFile]) -> Self {
        let tasks = files
            .iter()
            .enumerate()
            .map(|(index, file)| UploadTaskSnapshot {
                index,
                destination_key: file.destination_key.clone(),
                bytes_transferred: 0,
                bytes_total: file.bytes.len() as u64,
                status: UploadStatus::Pending,
                url: None,
                error: None,
            })
            .collect();
        let mut tracker = Self {
            tasks,
            percent: 0.0,
        };
        tracker.recompute();
        tracker
    }

    /// A task acquired a transfer slot.
    pub fn mark_started(&mut self, index: usize) {
        if let Some(task) = self.open_task(index) {
            task.status = UploadStatus::InProgress;
        }
    }

    /// Record bytes moved for a task. Returns `true` if anything changed.
    ///
    /// Counts never go backwards, and `transferred` is clamped to the total.
    pub fn record_progress(&mut self, index: usize, transferred: u64, total: u64) -> bool {
        let Some(task) = self.open_task(index) else {
            return false;
        };

        if total > 0 {
            task.bytes_total = total;
        }
        let transferred = transferred.min(task.bytes_total).max(task.bytes_transferred);
        if transferred == task.bytes_transferred {
            return false;
        }
        task.bytes_transferred = transferred;
        self.recompute();
        true
    }

    /// A task stored its object.
    pub fn record_success(&mut self, index: usize, url: String) {
        if let Some(task) = self.open_task(index) {
            task.status = UploadStatus::Succeeded;
            task.bytes_transferred = task.bytes_total;
            task.url = Some(url);
            self.recompute();
        }
    }

    /// A task failed. Its bytes stay counted as they were.
    pub fn record_failure(&mut self, index: usize, error: &UploadError) {
        if let Some(task) = self.open_task(index) {
            task.status = UploadStatus::Failed;
            task.error = Some(error.to_string());
            self.recompute();
        }
    }

    /// Current aggregate percentage.
    pub const fn percent(&self) -> f64 {
        self.percent
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

    /// URLs of succeeded tasks, in request order.
    pub fn urls(&self) -> Vec<String> {
        self.tasks.iter().filter_map(|t| t.url.clone()).collect()
    }

    /// Snapshot for the progress channel.
    pub fn snapshot(&self) -> BatchProgress {
        BatchProgress {
            bytes_transferred: self.tasks.iter().map(|t| t.bytes_transferred).sum(),
            bytes_total: self.tasks.iter().map(|t| t.bytes_total).sum(),
            percent: self.percent,
            tasks: self.tasks.clone(),
        }
    }

    /// Mutable access to a task that has not settled yet.
    fn open_task(&mut self, index: usize) -> Option<&mut UploadTaskSnapshot> {
        self.tasks
            .get_mut(index)
            .filter(|t| !t.status.is_terminal())
    }

    #[allow(clippy::cast_precision_loss)]
    fn recompute(&mut self) {
        if self.is_complete() {
            self.percent = COMPLETE_PERCENT;
            return;
        }

        let transferred: u64 = self.tasks.iter().map(|t| t.bytes_transferred).sum();
        let total: u64 = self.tasks.iter().map(|t| t.bytes_total).sum();
        let raw = if total == 0 {
            0.0
        } else {
            transferred as f64 * 100.0 / total as f64
        };

        self.percent = self.percent.max(raw.min(MAX_IN_FLIGHT_PERCENT));
    }
}
