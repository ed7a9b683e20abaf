//! Upload event emitter port.
//!
//! This port abstracts upload event emission, allowing the coordinator
//! to emit events without coupling to presentation details (progress bars,
//! server-sent events).

use crate::upload::UploadEvent;

/// Port for emitting upload events.
pub trait UploadEventEmitterPort: Send + Sync {
    /// Emit an upload event.
    ///
    /// This method should not block.
    fn emit(&self, event: UploadEvent);

    /// Clone this emitter into a boxed trait object.
    fn clone_box(&self) -> Box<dyn UploadEventEmitterPort>;
}

/// A no-op upload event emitter for tests and headless contexts.
#[derive(Debug, Clone, Default)]
pub struct NoopUploadEmitter;

impl NoopUploadEmitter {
    /// Create a new no-op upload emitter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl UploadEventEmitterPort for NoopUploadEmitter {
    fn emit(&self, _event: UploadEvent) {}

    fn clone_box(&self) -> Box<dyn UploadEventEmitterPort> {
        Box::new(self.clone())
    }
}
