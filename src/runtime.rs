//! Action dispatcher
//!
//! Turns a submission into a message plus a background task that produces
//! its response. Submissions run independently of each other; there is no
//! cancellation, a `clear_history` only turns late responses into no-ops.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

use crate::action::Action;
use crate::history::{Message, SharedHistory};
use crate::state_machine::{SubmissionContext, SubmissionState};
use executor::SubmissionExecutor;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use traits::ImageClient;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Message text must not be empty")]
    EmptyText,
}

/// An accepted submission
pub struct Submission {
    /// The message as recorded, before any response
    pub message: Message,
    task: JoinHandle<SubmissionState>,
}

impl Submission {
    /// Wait for the response to be produced and return the final state
    #[allow(dead_code)] // Used in tests
    pub async fn wait(self) -> SubmissionState {
        self.task.await.unwrap_or_else(|e| {
            tracing::error!(message_id = %self.message.id, error = %e, "Submission task failed");
            SubmissionState::Failed {
                error: e.to_string(),
            }
        })
    }
}

#[derive(Clone)]
pub struct Dispatcher {
    history: SharedHistory,
    image_client: Arc<dyn ImageClient>,
    transform_delay: Duration,
}

impl Dispatcher {
    pub fn new(
        history: SharedHistory,
        image_client: Arc<dyn ImageClient>,
        transform_delay: Duration,
    ) -> Self {
        Self {
            history,
            image_client,
            transform_delay,
        }
    }

    pub fn history(&self) -> &SharedHistory {
        &self.history
    }

    /// Record the message and start producing its response.
    ///
    /// Returns as soon as the message is in the history; the response is
    /// attached later by the spawned task. Must be called inside a tokio
    /// runtime.
    pub fn submit(&self, text: &str, action: Option<&str>) -> Result<Submission, SubmitError> {
        if text.trim().is_empty() {
            return Err(SubmitError::EmptyText);
        }

        let resolved = Action::from_label(action);
        let message = self
            .history
            .lock()
            .unwrap()
            .add_message(text, action.map(str::to_string));

        tracing::info!(
            message_id = %message.id,
            action = ?action,
            remote = resolved.is_remote(),
            "Message submitted"
        );

        let context =
            SubmissionContext::new(message.id.clone(), text, resolved, self.transform_delay);
        let executor =
            SubmissionExecutor::new(context, self.history.clone(), self.image_client.clone());
        let task = tokio::spawn(executor.run());

        Ok(Submission { message, task })
    }
}
