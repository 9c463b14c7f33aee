//! Submission state types

use crate::action::{Action, Transform};
use std::time::Duration;

/// Where the response for a submission is being produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkKind {
    Local(Transform),
    Remote,
}

/// Lifecycle of a single submission
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    /// Not yet handed to the executor
    #[default]
    Idle,

    /// Message recorded, work not started
    Submitted,

    /// Transform timer or image request in flight
    Processing { work: WorkKind },

    /// Response produced and handed to the history
    Completed,

    /// Image generation failed; a failure text was handed to the history
    Failed { error: String },
}

impl SubmissionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionState::Completed | SubmissionState::Failed { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            SubmissionState::Idle => "idle",
            SubmissionState::Submitted => "submitted",
            SubmissionState::Processing { .. } => "processing",
            SubmissionState::Completed => "completed",
            SubmissionState::Failed { .. } => "failed",
        }
    }
}

/// Immutable facts about the submission, available to every transition
#[derive(Debug, Clone)]
pub struct SubmissionContext {
    pub message_id: String,
    pub text: String,
    pub action: Action,
    pub transform_delay: Duration,
}

impl SubmissionContext {
    pub fn new(
        message_id: impl Into<String>,
        text: impl Into<String>,
        action: Action,
        transform_delay: Duration,
    ) -> Self {
        Self {
            message_id: message_id.into(),
            text: text.into(),
            action,
            transform_delay,
        }
    }
}
