//! Mock implementations for testing
//!
//! These mocks enable testing the history and the dispatcher without real I/O.

use super::traits::{Clock, IdGenerator, ImageClient, SnapshotStore};
use crate::history::Message;
use crate::image::ImageError;
use crate::store::StoreError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

// ============================================================================
// Mock Image Client
// ============================================================================

/// Mock image client that returns queued results
pub struct MockImageClient {
    responses: Mutex<VecDeque<Result<String, ImageError>>>,
    /// Record of all prompts sent
    pub prompts: Mutex<Vec<String>>,
}

impl MockImageClient {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn queue_image(&self, image: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(image.into()));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: ImageError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded prompts
    pub fn recorded_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn next_result(&self) -> Result<String, ImageError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ImageError::network("No mock response queued")))
    }
}

impl Default for MockImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageClient for MockImageClient {
    async fn generate(&self, prompt: &str) -> Result<String, ImageError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.next_result()
    }
}

// ============================================================================
// Delayed Mock Image Client (for in-flight testing)
// ============================================================================

/// Mock image client that holds each request for a fixed delay
pub struct DelayedMockImageClient {
    inner: MockImageClient,
    delay: Duration,
    /// Notified when a request starts (for test synchronization)
    pub request_started: Arc<Notify>,
}

impl DelayedMockImageClient {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MockImageClient::new(),
            delay,
            request_started: Arc::new(Notify::new()),
        }
    }

    pub fn queue_image(&self, image: impl Into<String>) {
        self.inner.queue_image(image);
    }
}

#[async_trait]
impl ImageClient for DelayedMockImageClient {
    async fn generate(&self, prompt: &str) -> Result<String, ImageError> {
        self.inner.prompts.lock().unwrap().push(prompt.to_string());
        self.request_started.notify_one();
        tokio::time::sleep(self.delay).await;
        self.inner.next_result()
    }
}

// ============================================================================
// Clock and Id Generator
// ============================================================================

/// Clock that only moves when told to
pub struct FixedClock {
    now: AtomicI64,
}

impl FixedClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }

    pub fn set(&self, now: i64) {
        self.now.store(now, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// Predictable ids: `<prefix>-1`, `<prefix>-2`, ...
pub struct SequentialIds {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(1),
        }
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        format!("{}-{n}", self.prefix)
    }
}

// ============================================================================
// Failing Store
// ============================================================================

/// Store whose operations fail on demand; every operation succeeds until
/// told otherwise.
#[derive(Default)]
pub struct FailingStore {
    failing_load: AtomicBool,
    failing_save: AtomicBool,
    failing_clear: AtomicBool,
    saved: Mutex<Option<Vec<Message>>>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing_load(&self, failing: bool) {
        self.failing_load.store(failing, Ordering::SeqCst);
    }

    pub fn set_failing_save(&self, failing: bool) {
        self.failing_save.store(failing, Ordering::SeqCst);
    }

    pub fn set_failing_clear(&self, failing: bool) {
        self.failing_clear.store(failing, Ordering::SeqCst);
    }

    /// Length of the last successfully saved snapshot
    pub fn saved_len(&self) -> Option<usize> {
        self.saved.lock().unwrap().as_ref().map(Vec::len)
    }

    fn injected_error() -> StoreError {
        StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "injected failure",
        ))
    }
}

impl SnapshotStore for FailingStore {
    fn load(&self) -> Result<Option<Vec<Message>>, StoreError> {
        if self.failing_load.load(Ordering::SeqCst) {
            return Err(Self::injected_error());
        }
        Ok(self.saved.lock().unwrap().clone())
    }

    fn save(&self, messages: &[Message]) -> Result<(), StoreError> {
        if self.failing_save.load(Ordering::SeqCst) {
            return Err(Self::injected_error());
        }
        *self.saved.lock().unwrap() = Some(messages.to_vec());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        if self.failing_clear.load(Ordering::SeqCst) {
            return Err(Self::injected_error());
        }
        *self.saved.lock().unwrap() = None;
        Ok(())
    }
}
