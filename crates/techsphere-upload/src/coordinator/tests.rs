use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures_util::StreamExt;
use tokio::sync::Notify;

use techsphere_core::ports::{NoopUploadEmitter, ProgressCallback};
use techsphere_core::upload::{BatchProgress, COMPLETE_PERCENT, UploadFile};

use super::*;

/// Backend that reports progress in two halves and can be told to fail or
/// to hold a key until released.
#[derive(Default)]
struct ScriptedBackend {
    failing: HashSet<String>,
    held: HashSet<String>,
    release: Notify,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    completed: AtomicUsize,
}

impl ScriptedBackend {
    fn failing(keys: &[&str]) -> Self {
        Self {
            failing: keys.iter().map(|k| (*k).to_string()).collect(),
            ..Self::default()
        }
    }

    fn holding(mut self, keys: &[&str]) -> Self {
        self.held = keys.iter().map(|k| (*k).to_string()).collect();
        self
    }
}

#[async_trait]
impl BlobUploadPort for ScriptedBackend {
    async fn upload(
        &self,
        destination_key: &str,
        bytes: Vec<u8>,
        on_progress: &ProgressCallback,
    ) -> Result<String, UploadError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let total = bytes.len() as u64;
        on_progress(total / 2, total);
        tokio::task::yield_now().await;
        if self.held.contains(destination_key) {
            self.release.notified().await;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.failing.contains(destination_key) {
            return Err(UploadError::transport("connection reset"));
        }
        on_progress(total, total);
        self.completed.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://cdn.test/{destination_key}"))
    }
}

#[derive(Default, Clone)]
struct RecordingEmitter {
    events: Arc<Mutex<Vec<UploadEvent>>>,
}

impl RecordingEmitter {
    fn events(&self) -> Vec<UploadEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl UploadEventEmitterPort for RecordingEmitter {
    fn emit(&self, event: UploadEvent) {
        self.events.lock().unwrap().push(event);
    }

    fn clone_box(&self) -> Box<dyn UploadEventEmitterPort> {
        Box::new(self.clone())
    }
}

fn request(keys: &[&str]) -> UploadBatchRequest {
    UploadBatchRequest::new(
        keys.iter()
            .map(|k| UploadFile::new(*k, vec![0; 100]))
            .collect(),
    )
}

fn coordinator(backend: Arc<ScriptedBackend>, emitter: Arc<dyn UploadEventEmitterPort>) -> UploadCoordinatorImpl {
    UploadCoordinatorImpl::new(
        backend,
        emitter,
        UploadCoordinatorConfig {
            max_concurrent: 4,
            progress_interval: Duration::ZERO,
        },
    )
}

async fn wait_until(rx: &mut watch::Receiver<BatchProgress>, pred: impl Fn(&BatchProgress) -> bool) {
    loop {
        if pred(&*rx.borrow_and_update()) {
            return;
        }
        if rx.changed().await.is_err() {
            return;
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_all_succeed_in_request_order() {
    let backend = Arc::new(ScriptedBackend::default());
    let coord = coordinator(backend, Arc::new(NoopUploadEmitter::new()));

    let batch = coord
        .upload_batch(request(&["p/a", "p/b", "p/c"]))
        .await
        .unwrap();
    let urls = batch.wait().await.unwrap();

    assert_eq!(
        urls,
        vec![
            "https://cdn.test/p/a",
            "https://cdn.test/p/b",
            "https://cdn.test/p/c"
        ]
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_middle_failure_reports_siblings_urls() {
    let backend = Arc::new(ScriptedBackend::failing(&["p/b"]).holding(&["p/b"]));
    let coord = coordinator(Arc::clone(&backend), Arc::new(NoopUploadEmitter::new()));

    let batch = coord
        .upload_batch(request(&["p/a", "p/b", "p/c"]))
        .await
        .unwrap();

    // Let both siblings finish before the held file is allowed to fail.
    let mut progress = batch.progress();
    wait_until(&mut progress, |p| p.succeeded() == 2).await;
    backend.release.notify_one();

    let failure = batch.wait().await.unwrap_err();
    assert_eq!(failure.index, 1);
    assert_eq!(failure.destination_key, "p/b");
    let completed: Vec<usize> = failure.completed.iter().map(|c| c.index).collect();
    assert_eq!(completed, vec![0, 2]);
    assert_eq!(backend.completed.load(Ordering::SeqCst), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_settle_keeps_failures_isolated() {
    let backend = Arc::new(ScriptedBackend::failing(&["p/a"]));
    let coord = coordinator(backend, Arc::new(NoopUploadEmitter::new()));

    let batch = coord
        .upload_batch(request(&["p/a", "p/b", "p/c"]))
        .await
        .unwrap();
    let outcomes = batch.settle().await;

    assert!(outcomes[0].result.is_err());
    assert!(outcomes[1].result.is_ok());
    assert!(outcomes[2].result.is_ok());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_progress_is_monotonic_and_ends_at_100() {
    let backend = Arc::new(ScriptedBackend::default());
    let coord = coordinator(backend, Arc::new(NoopUploadEmitter::new()));

    let batch = coord
        .upload_batch(request(&["p/a", "p/b", "p/c", "p/d"]))
        .await
        .unwrap();
    let stream = batch.progress_stream();
    let urls = batch.wait().await.unwrap();
    assert_eq!(urls.len(), 4);

    let seen: Vec<BatchProgress> = stream.collect().await;
    let last = seen.last().unwrap();
    assert!((last.percent - COMPLETE_PERCENT).abs() < f64::EPSILON);
    assert!(last.is_complete());
    for pair in seen.windows(2) {
        assert!(pair[1].percent >= pair[0].percent);
    }
    for snapshot in &seen {
        if snapshot.percent >= COMPLETE_PERCENT {
            assert!(snapshot.is_complete());
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_failed_batch_never_reaches_100() {
    let backend = Arc::new(ScriptedBackend::failing(&["p/b"]));
    let coord = coordinator(backend, Arc::new(NoopUploadEmitter::new()));

    let batch = coord.upload_batch(request(&["p/a", "p/b"])).await.unwrap();
    let stream = batch.progress_stream();
    batch.settle().await;

    let seen: Vec<BatchProgress> = stream.collect().await;
    assert!(seen.iter().all(|p| p.percent < COMPLETE_PERCENT));
    assert_eq!(seen.last().unwrap().failed(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrency_is_capped() {
    let backend = Arc::new(ScriptedBackend::default());
    let coord = UploadCoordinatorImpl::new(
        Arc::clone(&backend) as Arc<dyn BlobUploadPort>,
        Arc::new(NoopUploadEmitter::new()),
        UploadCoordinatorConfig {
            max_concurrent: 2,
            progress_interval: Duration::ZERO,
        },
    );

    let keys: Vec<String> = (0..8).map(|i| format!("p/{i}")).collect();
    let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
    let batch = coord.upload_batch(request(&refs)).await.unwrap();
    batch.wait().await.unwrap();

    assert!(backend.max_in_flight.load(Ordering::SeqCst) <= 2);
    assert_eq!(backend.completed.load(Ordering::SeqCst), 8);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_dropped_handle_does_not_cancel() {
    let backend = Arc::new(ScriptedBackend::default());
    let emitter = RecordingEmitter::default();
    let coord = coordinator(Arc::clone(&backend), Arc::new(emitter.clone()));

    let batch = coord.upload_batch(request(&["p/a", "p/b"])).await.unwrap();
    let mut progress = batch.progress();
    drop(batch);

    wait_until(&mut progress, BatchProgress::is_settled).await;
    assert_eq!(backend.completed.load(Ordering::SeqCst), 2);
    assert!(emitter.events().iter().any(UploadEvent::is_terminal));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_event_sequence() {
    let backend = Arc::new(ScriptedBackend::failing(&["p/b"]));
    let emitter = RecordingEmitter::default();
    let coord = coordinator(backend, Arc::new(emitter.clone()));

    let batch = coord.upload_batch(request(&["p/a", "p/b"])).await.unwrap();
    let batch_id = batch.id().to_string();
    batch.settle().await;

    let events = emitter.events();
    assert!(matches!(
        events.first(),
        Some(UploadEvent::BatchStarted { task_count: 2, bytes_total: 200, .. })
    ));
    assert!(matches!(
        events.last(),
        Some(UploadEvent::BatchFailed { succeeded: 1, failed: 1, .. })
    ));
    assert!(events.iter().all(|e| e.batch_id() == batch_id));
    assert_eq!(events.iter().filter(|e| e.is_terminal()).count(), 1);
    assert!(events
        .iter()
        .any(|e| matches!(e, UploadEvent::TaskFailed { index: 1, .. })));
}

#[tokio::test]
async fn test_empty_batch_completes_immediately() {
    let emitter = RecordingEmitter::default();
    let coord = coordinator(Arc::new(ScriptedBackend::default()), Arc::new(emitter.clone()));

    let batch = coord.upload_batch(UploadBatchRequest::default()).await.unwrap();
    assert!(batch.snapshot().is_complete());
    assert!(batch.wait().await.unwrap().is_empty());
    assert!(matches!(
        emitter.events().last(),
        Some(UploadEvent::BatchCompleted { urls, .. }) if urls.is_empty()
    ));
}

#[tokio::test]
async fn test_blank_key_is_rejected_up_front() {
    let backend = Arc::new(ScriptedBackend::default());
    let coord = coordinator(Arc::clone(&backend), Arc::new(NoopUploadEmitter::new()));

    let err = coord.upload_batch(request(&["p/a", "  "])).await.unwrap_err();
    assert!(matches!(err, UploadError::InvalidKey { .. }));
    assert_eq!(backend.in_flight.load(Ordering::SeqCst), 0);
}

#[test]
fn test_config_from_settings() {
    let settings = Settings {
        max_concurrent_uploads: Some(3),
        progress_interval_ms: Some(250),
        ..Settings::default()
    };
    let config = UploadCoordinatorConfig::from_settings(&settings);
    assert_eq!(config.max_concurrent, 3);
    assert_eq!(config.progress_interval, Duration::from_millis(250));
}
