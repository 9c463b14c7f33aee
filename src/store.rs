//! Snapshot stores for the conversation log
//!
//! Each store holds exactly one snapshot: the whole conversation serialized as
//! a JSON array of messages. Stores never look inside the snapshot beyond
//! encoding and decoding it.

mod json_file;
mod memory;
mod sqlite;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::config::StoreBackend;
use crate::history::Message;
use crate::runtime::traits::SnapshotStore;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Corrupt snapshot: {0}")]
    Corrupt(#[source] serde_json::Error),
    #[error("Failed to serialize snapshot: {0}")]
    Serialization(#[source] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Open the store selected by configuration
pub fn open(backend: StoreBackend, path: &Path) -> StoreResult<Arc<dyn SnapshotStore>> {
    let store: Arc<dyn SnapshotStore> = match backend {
        StoreBackend::Json => Arc::new(JsonFileStore::open(path)?),
        StoreBackend::Sqlite => Arc::new(SqliteStore::open(path)?),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}

fn encode(messages: &[Message]) -> StoreResult<String> {
    serde_json::to_string(messages).map_err(StoreError::Serialization)
}

fn decode(raw: &str) -> StoreResult<Vec<Message>> {
    serde_json::from_str(raw).map_err(StoreError::Corrupt)
}
