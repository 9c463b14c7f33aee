//! Pure state transition function

use super::{Effect, Event, SubmissionContext, SubmissionState, WorkKind};
use crate::action::Action;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: SubmissionState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: SubmissionState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("Submission already finished ({0})")]
    AlreadyFinished(&'static str),
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

/// Pure transition function
///
/// Given the same inputs it always produces the same outputs and performs no
/// I/O; effects describe the work the caller must carry out.
pub fn transition(
    state: &SubmissionState,
    context: &SubmissionContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // Terminal states accept nothing
        (SubmissionState::Completed | SubmissionState::Failed { .. }, _) => {
            Err(TransitionError::AlreadyFinished(state.name()))
        }

        (SubmissionState::Idle, Event::Submit) => {
            Ok(TransitionResult::new(SubmissionState::Submitted))
        }

        (SubmissionState::Submitted, Event::Begin) => match context.action {
            Action::Local(transform) => Ok(TransitionResult::new(SubmissionState::Processing {
                work: WorkKind::Local(transform),
            })
            .with_effect(Effect::RunTransform {
                transform,
                delay: context.transform_delay,
            })),
            Action::GenerateImage => Ok(TransitionResult::new(SubmissionState::Processing {
                work: WorkKind::Remote,
            })
            .with_effect(Effect::RequestImage {
                prompt: context.text.clone(),
            })),
        },

        (SubmissionState::Processing { .. }, Event::WorkSucceeded { response }) => {
            Ok(TransitionResult::new(SubmissionState::Completed)
                .with_effect(Effect::AttachResponse { response }))
        }

        // Local transforms cannot fail, only the image request can
        (
            SubmissionState::Processing {
                work: WorkKind::Remote,
            },
            Event::WorkFailed { error },
        ) => {
            let text = error.failure_message();
            Ok(TransitionResult::new(SubmissionState::Failed {
                error: error.message,
            })
            .with_effect(Effect::attach_text(text)))
        }

        (state, event) => Err(TransitionError::InvalidTransition(format!(
            "{} cannot handle {}",
            state.name(),
            event.name()
        ))),
    }
}
