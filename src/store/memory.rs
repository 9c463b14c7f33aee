//! In-memory snapshot store
//!
//! Used when no durable store is configured or the configured one cannot be
//! opened or read; the conversation then lives only as long as the process.

use super::{decode, encode, StoreResult};
use crate::history::Message;
use crate::runtime::traits::SnapshotStore;
use std::sync::Mutex;

/// Keeps the serialized snapshot, so loads go through the same decoding as
/// the durable stores.
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an arbitrary stored value (for testing corrupt snapshots)
    #[cfg(test)]
    pub fn with_raw(raw: &str) -> Self {
        Self {
            raw: Mutex::new(Some(raw.to_string())),
        }
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> StoreResult<Option<Vec<Message>>> {
        self.raw.lock().unwrap().as_deref().map(decode).transpose()
    }

    fn save(&self, messages: &[Message]) -> StoreResult<()> {
        let raw = encode(messages)?;
        *self.raw.lock().unwrap() = Some(raw);
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        *self.raw.lock().unwrap() = None;
        Ok(())
    }
}
