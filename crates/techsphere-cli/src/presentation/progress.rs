//! Terminal progress bars for upload batches.
//!
//! Implements `UploadEventEmitterPort` so the coordinator drives the bars
//! without knowing about the terminal.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use techsphere_core::{UploadEvent, UploadEventEmitterPort};

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}";

/// One progress bar per in-flight batch, drawn on stderr.
#[derive(Clone)]
pub struct ProgressBarEmitter {
    bars: Arc<Mutex<HashMap<String, ProgressBar>>>,
    visible: bool,
}

impl ProgressBarEmitter {
    /// Create an emitter; `visible = false` tracks state without drawing.
    pub fn new(visible: bool) -> Self {
        Self {
            bars: Arc::new(Mutex::new(HashMap::new())),
            visible,
        }
    }

    fn create_bar(&self, bytes_total: u64, task_count: usize) -> ProgressBar {
        let target = if self.visible {
            ProgressDrawTarget::stderr()
        } else {
            ProgressDrawTarget::hidden()
        };
        let bar = ProgressBar::with_draw_target(Some(bytes_total), target);
        bar.set_style(
            ProgressStyle::with_template(BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        bar.set_message(format!("uploading {task_count} file(s)"));
        bar
    }

    /// Number of batches with an open bar.
    pub fn active_batches(&self) -> usize {
        self.bars.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl UploadEventEmitterPort for ProgressBarEmitter {
    fn emit(&self, event: UploadEvent) {
        let mut bars = self.bars.lock().unwrap_or_else(PoisonError::into_inner);
        match event {
            UploadEvent::BatchStarted {
                batch_id,
                task_count,
                bytes_total,
            } => {
                let bar = self.create_bar(bytes_total, task_count);
                bars.insert(batch_id, bar);
            }
            UploadEvent::BatchProgress {
                batch_id,
                bytes_transferred,
                ..
            } => {
                if let Some(bar) = bars.get(&batch_id) {
                    bar.set_position(bytes_transferred);
                }
            }
            UploadEvent::TaskCompleted {
                batch_id,
                destination_key,
                ..
            } => {
                if let Some(bar) = bars.get(&batch_id) {
                    bar.set_message(format!("stored {destination_key}"));
                }
            }
            UploadEvent::TaskFailed {
                batch_id,
                destination_key,
                error,
                ..
            } => {
                if let Some(bar) = bars.get(&batch_id) {
                    bar.println(format!("✗ {destination_key}: {error}"));
                }
            }
            UploadEvent::BatchCompleted { batch_id, urls } => {
                if let Some(bar) = bars.remove(&batch_id) {
                    bar.finish_with_message(format!("{} file(s) uploaded", urls.len()));
                }
            }
            UploadEvent::BatchFailed {
                batch_id,
                succeeded,
                failed,
            } => {
                if let Some(bar) = bars.remove(&batch_id) {
                    bar.abandon_with_message(format!("{failed} failed, {succeeded} uploaded"));
                }
            }
        }
    }

    fn clone_box(&self) -> Box<dyn UploadEventEmitterPort> {
        Box::new(self.clone())
    }
}
