//! Conversation state manager
//!
//! Owns the ordered message log. Messages are only ever appended, responses
//! are attached by message id at most once, and every mutation is mirrored to
//! the snapshot store and broadcast to observers.

mod message;

#[cfg(test)]
mod proptests;

pub use message::{Message, Response};

use crate::runtime::traits::{Clock, IdGenerator, SnapshotStore};
use crate::store::{MemoryStore, StoreError};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;

/// Capacity of the observer channel; slow observers skip lagged events
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// History shared between the dispatcher, its tasks and the HTTP layer.
/// Every operation runs inside one lock, so partial mutations are never visible.
pub type SharedHistory = Arc<Mutex<ChatHistory>>;

/// Change notifications for observers of the log
#[derive(Debug, Clone)]
pub enum HistoryEvent {
    MessageAdded { message: Message },
    ResponseAttached { message: Message },
    Cleared,
}

/// What `add_response` did with the response it was given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    Attached,
    /// First write wins; the new response was dropped
    AlreadyResponded,
    /// No message with that id, e.g. the history was cleared mid-flight
    UnknownMessage,
}

pub struct ChatHistory {
    messages: Vec<Message>,
    store: Arc<dyn SnapshotStore>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
    events: broadcast::Sender<HistoryEvent>,
    /// Set after a failed save so repeated failures don't flood the log
    persistence_degraded: bool,
}

impl ChatHistory {
    /// Load the saved conversation, starting empty when there is none or it
    /// cannot be decoded.
    ///
    /// When the store itself cannot be read, the session runs against a
    /// `MemoryStore` so the saved snapshot is never overwritten.
    pub fn load(
        store: Arc<dyn SnapshotStore>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        let (messages, store) = match store.load() {
            Ok(Some(messages)) => {
                tracing::info!(count = messages.len(), "Loaded chat history");
                (repair(messages), store)
            }
            Ok(None) => (Vec::new(), store),
            Err(e @ StoreError::Corrupt(_)) => {
                tracing::warn!(error = %e, "Discarding unreadable chat history");
                (Vec::new(), store)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Chat history store unavailable, keeping this session in memory"
                );
                let memory: Arc<dyn SnapshotStore> = Arc::new(MemoryStore::new());
                (Vec::new(), memory)
            }
        };

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            messages,
            store,
            clock,
            ids,
            events,
            persistence_degraded: false,
        }
    }

    pub fn shared(self) -> SharedHistory {
        Arc::new(Mutex::new(self))
    }

    /// Append a new message and return it, identity included, before any
    /// response work starts.
    pub fn add_message(&mut self, text: impl Into<String>, action: Option<String>) -> Message {
        let mut id = self.ids.next_id();
        while self.contains(&id) {
            tracing::warn!(message_id = %id, "Generated message id already in use, regenerating");
            id = self.ids.next_id();
        }

        // Timestamps never go backwards along the log, even if the clock does
        let floor = self.messages.last().map_or(i64::MIN, |m| m.timestamp);
        let message = Message {
            id,
            text: text.into(),
            action,
            response: None,
            timestamp: self.clock.now_millis().max(floor),
        };

        self.messages.push(message.clone());
        self.persist();
        let _ = self.events.send(HistoryEvent::MessageAdded {
            message: message.clone(),
        });
        message
    }

    /// Attach a response to the message with the given id.
    pub fn add_response(&mut self, message_id: &str, response: Response) -> AttachOutcome {
        let Some(message) = self.messages.iter_mut().find(|m| m.id == message_id) else {
            // Expected when the history was cleared while the work was in flight
            tracing::debug!(message_id, "Dropping response for unknown message");
            return AttachOutcome::UnknownMessage;
        };

        if message.has_response() {
            tracing::warn!(
                message_id,
                dropped_kind = response.kind(),
                "Message already has a response, keeping the first one"
            );
            return AttachOutcome::AlreadyResponded;
        }

        message.response = Some(response);
        let updated = message.clone();
        tracing::debug!(message_id, response = %updated.response_summary(), "Response attached");
        self.persist();
        let _ = self
            .events
            .send(HistoryEvent::ResponseAttached { message: updated });
        AttachOutcome::Attached
    }

    /// Drop every message and the persisted snapshot.
    pub fn clear_history(&mut self) {
        let count = self.messages.len();
        self.messages.clear();

        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "Failed to remove saved chat history, overwriting it");
            // An empty snapshot still prevents the old log from coming back
            self.persist();
        }

        tracing::info!(count, "Chat history cleared");
        let _ = self.events.send(HistoryEvent::Cleared);
    }

    /// Owned copy of the log in display order
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    pub fn get(&self, message_id: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == message_id)
    }

    pub fn contains(&self, message_id: &str) -> bool {
        self.get(message_id).is_some()
    }

    #[allow(dead_code)] // Used in tests
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[allow(dead_code)] // Used in tests
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HistoryEvent> {
        self.events.subscribe()
    }

    #[allow(dead_code)] // Used in tests
    pub fn is_persistence_degraded(&self) -> bool {
        self.persistence_degraded
    }

    /// Mirror the log to the store. Failures never undo the in-memory change.
    fn persist(&mut self) {
        match self.store.save(&self.messages) {
            Ok(()) => {
                if self.persistence_degraded {
                    self.persistence_degraded = false;
                    tracing::info!("Chat history persistence recovered");
                }
            }
            Err(e) if self.persistence_degraded => {
                tracing::debug!(error = %e, "Chat history still not persisted");
            }
            Err(e) => {
                self.persistence_degraded = true;
                tracing::warn!(error = %e, "Failed to persist chat history, continuing in memory");
            }
        }
    }
}

/// Restore log invariants on a loaded snapshot: the first message with a
/// given id wins, and timestamps are raised so they never decrease.
fn repair(messages: Vec<Message>) -> Vec<Message> {
    let total = messages.len();
    let mut seen = HashSet::new();
    let mut floor = i64::MIN;
    let mut clamped = 0usize;

    let repaired: Vec<Message> = messages
        .into_iter()
        .filter(|m| seen.insert(m.id.clone()))
        .map(|mut m| {
            if m.timestamp < floor {
                m.timestamp = floor;
                clamped += 1;
            }
            floor = m.timestamp;
            m
        })
        .collect();

    let duplicates = total - repaired.len();
    if duplicates > 0 || clamped > 0 {
        tracing::warn!(duplicates, clamped, "Repaired loaded chat history");
    }
    repaired
}
