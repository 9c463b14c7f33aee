//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the history and the dispatcher with mock
//! implementations instead of real storage, clocks and network calls.

use crate::history::Message;
use crate::image::ImageError;
use crate::store::StoreError;
use async_trait::async_trait;

/// Durable slot holding the serialized conversation
pub trait SnapshotStore: Send + Sync {
    /// Read the saved snapshot; `None` when nothing has been saved
    fn load(&self) -> Result<Option<Vec<Message>>, StoreError>;

    /// Replace the saved snapshot with the full conversation
    fn save(&self, messages: &[Message]) -> Result<(), StoreError>;

    /// Remove the saved snapshot; clearing an absent snapshot succeeds
    fn clear(&self) -> Result<(), StoreError>;
}

/// Source of message timestamps
pub trait Clock: Send + Sync {
    /// Current time in epoch milliseconds
    fn now_millis(&self) -> i64;
}

/// Source of message identities
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Client for the image generation endpoint
#[async_trait]
pub trait ImageClient: Send + Sync {
    /// Generate an image for the prompt, returning base64-encoded PNG bytes
    async fn generate(&self, prompt: &str) -> Result<String, ImageError>;
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}
