//! Submission executor

use super::traits::ImageClient;
use crate::history::{AttachOutcome, Response, SharedHistory};
use crate::state_machine::{transition, Effect, Event, SubmissionContext, SubmissionState};
use std::sync::Arc;

/// Drives one submission from `Idle` to a terminal state, carrying out the
/// effects each transition asks for.
pub struct SubmissionExecutor {
    context: SubmissionContext,
    state: SubmissionState,
    history: SharedHistory,
    image_client: Arc<dyn ImageClient>,
}

impl SubmissionExecutor {
    pub fn new(
        context: SubmissionContext,
        history: SharedHistory,
        image_client: Arc<dyn ImageClient>,
    ) -> Self {
        Self {
            context,
            state: SubmissionState::Idle,
            history,
            image_client,
        }
    }

    pub async fn run(mut self) -> SubmissionState {
        for event in [Event::Submit, Event::Begin] {
            if let Err(e) = self.process_event(event).await {
                tracing::error!(
                    message_id = %self.context.message_id,
                    state = self.state.name(),
                    error = %e,
                    "Submission stopped"
                );
                break;
            }
        }

        if let SubmissionState::Failed { error } = &self.state {
            tracing::warn!(
                message_id = %self.context.message_id,
                error = %error,
                "Submission answered with failure text"
            );
        } else if !self.state.is_terminal() {
            tracing::error!(
                message_id = %self.context.message_id,
                state = self.state.name(),
                "Submission ended without a response"
            );
        }
        self.state
    }

    async fn process_event(&mut self, event: Event) -> Result<(), String> {
        // Effects may generate follow-up events; process them in a loop
        let mut events_to_process = vec![event];

        while let Some(current_event) = events_to_process.pop() {
            let result = transition(&self.state, &self.context, current_event)
                .map_err(|e| e.to_string())?;

            let old_state = std::mem::replace(&mut self.state, result.new_state);
            tracing::debug!(
                message_id = %self.context.message_id,
                from = old_state.name(),
                to = self.state.name(),
                "Submission transition"
            );

            for effect in result.effects {
                if let Some(generated_event) = self.execute_effect(effect).await {
                    events_to_process.push(generated_event);
                }
            }
        }

        Ok(())
    }

    /// Execute an effect and optionally return a generated event
    async fn execute_effect(&self, effect: Effect) -> Option<Event> {
        match effect {
            Effect::RunTransform { transform, delay } => {
                tokio::time::sleep(delay).await;
                Some(Event::WorkSucceeded {
                    response: Response::text(transform.apply(&self.context.text)),
                })
            }

            Effect::RequestImage { prompt } => match self.image_client.generate(&prompt).await {
                Ok(image) => Some(Event::WorkSucceeded {
                    response: Response::image(image),
                }),
                Err(error) => Some(Event::WorkFailed { error }),
            },

            Effect::AttachResponse { response } => {
                let outcome = self
                    .history
                    .lock()
                    .unwrap()
                    .add_response(&self.context.message_id, response);
                if outcome == AttachOutcome::Attached {
                    tracing::info!(message_id = %self.context.message_id, "Response attached");
                }
                None
            }
        }
    }
}
