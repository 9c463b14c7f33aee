//! Per-submission state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions. The
//! executor in `runtime` feeds events in and carries out the effects.

mod effect;
pub mod event;
pub mod state;
pub(crate) mod transition;


pub use effect::Effect;
pub use event::Event;
pub use state::{SubmissionContext, SubmissionState, WorkKind};
pub use transition::transition;
