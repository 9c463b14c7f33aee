//! Property-based tests for the conversation log
//!
//! These tests verify the ordering, identity and first-write-wins invariants
//! hold across arbitrary operation sequences.

use super::*;
use crate::runtime::testing::{FixedClock, SequentialIds};
use crate::runtime::traits::UuidGenerator;
use crate::store::MemoryStore;
use proptest::prelude::*;
use std::collections::HashSet;

// ============================================================================
// Test Helpers
// ============================================================================

fn new_history(store: Arc<MemoryStore>) -> ChatHistory {
    ChatHistory::load(
        store,
        Arc::new(FixedClock::new(0)),
        Arc::new(SequentialIds::new("msg")),
    )
}

/// Operations a caller can perform against the history
#[derive(Debug, Clone)]
enum Op {
    Add { text: String, action: Option<String> },
    /// Respond to the message at this index (modulo the current length)
    Respond { index: usize, content: String },
    /// Respond to an id that was never handed out
    RespondUnknown { content: String },
    AdvanceClock { millis: i64 },
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_action() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("Summary".to_string())),
        Just(Some("Make shorter".to_string())),
        Just(Some("Generate Image".to_string())),
        "[A-Za-z ]{1,12}".prop_map(Some),
    ]
}

fn arb_response() -> impl Strategy<Value = Response> {
    prop_oneof![
        "[a-zA-Z0-9 ]{0,30}".prop_map(Response::text),
        "[A-Za-z0-9+/]{4,16}".prop_map(Response::image),
    ]
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => ("[a-zA-Z0-9 ]{1,40}", arb_action())
            .prop_map(|(text, action)| Op::Add { text, action }),
        2 => (any::<usize>(), "[a-z ]{0,20}")
            .prop_map(|(index, content)| Op::Respond { index, content }),
        1 => "[a-z ]{0,20}".prop_map(|content| Op::RespondUnknown { content }),
        1 => (-50i64..500).prop_map(|millis| Op::AdvanceClock { millis }),
    ]
}

fn arb_message() -> impl Strategy<Value = Message> {
    (
        "[a-z0-9-]{1,36}",
        "\\PC{1,40}",
        arb_action(),
        proptest::option::of(arb_response()),
        any::<i64>(),
    )
        .prop_map(|(id, text, action, response, timestamp)| Message {
            id,
            text,
            action,
            response,
            timestamp,
        })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_order_matches_call_order_and_ids_are_unique(
        entries in proptest::collection::vec(("[a-zA-Z ]{1,20}", arb_action()), 1..40)
    ) {
        let store = Arc::new(MemoryStore::new());
        let mut history = ChatHistory::load(
            store,
            Arc::new(FixedClock::new(0)),
            Arc::new(UuidGenerator),
        );

        let created: Vec<Message> = entries
            .iter()
            .map(|(text, action)| history.add_message(text.clone(), action.clone()))
            .collect();

        let snapshot = history.snapshot();
        prop_assert_eq!(&snapshot, &created);

        let ids: HashSet<&str> = snapshot.iter().map(|m| m.id.as_str()).collect();
        prop_assert_eq!(ids.len(), snapshot.len());
    }

    #[test]
    fn prop_invariants_hold_across_operation_sequences(
        ops in proptest::collection::vec(arb_op(), 1..60)
    ) {
        let store = Arc::new(MemoryStore::new());
        let clock = Arc::new(FixedClock::new(1_000));
        let mut history = ChatHistory::load(
            store.clone(),
            clock.clone(),
            Arc::new(SequentialIds::new("msg")),
        );
        let mut first_responses: Vec<Option<Response>> = Vec::new();

        for op in ops {
            match op {
                Op::Add { text, action } => {
                    history.add_message(text, action);
                    first_responses.push(None);
                }
                Op::Respond { index, content } => {
                    if history.is_empty() {
                        continue;
                    }
                    let index = index % history.len();
                    let id = history.snapshot()[index].id.clone();
                    let response = Response::text(content);
                    let outcome = history.add_response(&id, response.clone());
                    if first_responses[index].is_none() {
                        prop_assert_eq!(outcome, AttachOutcome::Attached);
                        first_responses[index] = Some(response);
                    } else {
                        prop_assert_eq!(outcome, AttachOutcome::AlreadyResponded);
                    }
                }
                Op::RespondUnknown { content } => {
                    let before = history.snapshot();
                    let outcome = history.add_response("never-issued", Response::text(content));
                    prop_assert_eq!(outcome, AttachOutcome::UnknownMessage);
                    prop_assert_eq!(history.snapshot(), before);
                }
                Op::AdvanceClock { millis } => clock.advance(millis),
            }
        }

        let snapshot = history.snapshot();

        // Responses are exactly the first ones written
        let responses: Vec<Option<Response>> =
            snapshot.iter().map(|m| m.response.clone()).collect();
        prop_assert_eq!(&responses, &first_responses);

        // Timestamps are non-decreasing along the log
        for pair in snapshot.windows(2) {
            prop_assert!(pair[0].timestamp <= pair[1].timestamp);
        }

        // The store always mirrors the latest in-memory state
        let reloaded = new_history(store);
        prop_assert_eq!(reloaded.snapshot(), snapshot);
    }

    #[test]
    fn prop_snapshot_round_trips_through_store(
        messages in proptest::collection::vec(arb_message(), 0..20)
    ) {
        let store = MemoryStore::new();
        store.save(&messages).unwrap();
        let loaded = store.load().unwrap().unwrap_or_default();
        prop_assert_eq!(loaded, messages);
    }
}
