//! Serialized session writes.
//!
//! Every cart mutation enqueues a full snapshot; a single background task
//! applies them in enqueue order, so a later state can never be overwritten
//! by an earlier one.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use crate::domain::Cart;
use crate::ports::SessionStorePort;

enum WriteCommand {
    Put { key: String, value: String },
    Flush(oneshot::Sender<()>),
}

/// Single-writer queue in front of a [`SessionStorePort`].
///
/// The background task ends once every handle is dropped and the queue has
/// drained.
#[derive(Clone)]
pub struct SessionWriteQueue {
    tx: mpsc::UnboundedSender<WriteCommand>,
}

impl SessionWriteQueue {
    /// Spawn the writer task. Must be called from within a Tokio runtime.
    pub fn spawn(store: Arc<dyn SessionStorePort>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(store, rx));
        Self { tx }
    }

    /// Queue the serialized cart under `key`. Never blocks.
    pub fn enqueue(&self, key: &str, cart: &Cart) {
        let value = match serde_json::to_string(cart) {
            Ok(value) => value,
            Err(e) => {
                warn!(target: "techsphere.cart", key, error = %e, "Failed to serialize cart");
                return;
            }
        };

        let command = WriteCommand::Put {
            key: key.to_string(),
            value,
        };
        if self.tx.send(command).is_err() {
            warn!(target: "techsphere.cart", key, "Session writer stopped; change not persisted");
        }
    }

    /// Resolve once every write queued before this call has been attempted.
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(WriteCommand::Flush(done_tx)).is_err() {
            return;
        }
        let _ = done_rx.await;
    }
}

async fn run_writer(
    store: Arc<dyn SessionStorePort>,
    mut rx: mpsc::UnboundedReceiver<WriteCommand>,
) {
    while let Some(command) = rx.recv().await {
        match command {
            WriteCommand::Put { key, value } => match store.write(&key, &value).await {
                Ok(()) => debug!(target: "techsphere.cart", key = %key, bytes = value.len(), "Cart persisted"),
                // In-memory state stays authoritative; the next mutation retries.
                Err(e) => warn!(target: "techsphere.cart", key = %key, error = %e, "Failed to persist cart"),
            },
            WriteCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
}
