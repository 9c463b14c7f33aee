//! Server-Sent Events support

use crate::history::{HistoryEvent, Message};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

/// Stream the current snapshot as `init`, then every history change.
///
/// The snapshot and the receiver must come from the same lock acquisition so
/// no change falls between them. An observer that falls behind the channel
/// gets a final `lagged` event and the stream ends; reconnecting yields a
/// fresh `init`.
pub fn sse_stream(
    snapshot: Vec<Message>,
    broadcast_rx: tokio::sync::broadcast::Receiver<HistoryEvent>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let init_data = json!({
        "type": "init",
        "messages": snapshot,
    });
    let init = futures::stream::once(async move {
        Ok(Event::default().event("init").data(init_data.to_string()))
    });

    let broadcasts = futures::stream::unfold(
        Some(BroadcastStream::new(broadcast_rx)),
        |rx| async move {
            let mut rx = rx?;
            match rx.next().await? {
                Ok(event) => Some((Ok(history_event_to_axum(&event)), Some(rx))),
                Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "SSE observer lagged, closing stream");
                    Some((Ok(lagged_event(skipped)), None))
                }
            }
        },
    );

    Sse::new(init.chain(broadcasts)).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn lagged_event(skipped: u64) -> Event {
    Event::default()
        .event("lagged")
        .data(json!({"type": "lagged", "skipped": skipped}).to_string())
}

fn history_event_to_axum(event: &HistoryEvent) -> Event {
    let (event_type, data) = event_payload(event);
    Event::default().event(event_type).data(data.to_string())
}

fn event_payload(event: &HistoryEvent) -> (&'static str, Value) {
    match event {
        HistoryEvent::MessageAdded { message } => (
            "message_added",
            json!({
                "type": "message_added",
                "message": message
            }),
        ),
        HistoryEvent::ResponseAttached { message } => (
            "response_attached",
            json!({
                "type": "response_attached",
                "message": message
            }),
        ),
        HistoryEvent::Cleared => (
            "cleared",
            json!({
                "type": "cleared"
            }),
        ),
    }
}
