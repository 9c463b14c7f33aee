//! HTTP API for rendering collaborators
//!
//! Read-only snapshots, submissions, clearing, and a live event stream.

mod handlers;
mod sse;
mod types;

pub use handlers::create_router;

use crate::runtime::Dispatcher;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}
