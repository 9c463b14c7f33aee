//! Effects produced by state transitions

use crate::action::Transform;
use crate::history::Response;
use std::time::Duration;

/// Effects to be executed after a state transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Wait, then apply the transform to the submitted text
    RunTransform { transform: Transform, delay: Duration },

    /// Call the image endpoint with the submitted text as prompt
    RequestImage { prompt: String },

    /// Hand the response to the history, keyed by the submission's message id
    AttachResponse { response: Response },
}

impl Effect {
    pub fn attach_text(content: impl Into<String>) -> Self {
        Effect::AttachResponse {
            response: Response::text(content),
        }
    }
}
