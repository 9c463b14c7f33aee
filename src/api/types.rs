//! API request and response types

use crate::history::Message;
use serde::{Deserialize, Serialize};

/// Request to submit a message
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub text: String,
    #[serde(default)]
    pub action: Option<String>,
}

/// Response for a submission: the message as recorded, response pending
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub message: Message,
}

/// Full conversation snapshot
#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<Message>,
}

/// Recognised action labels, in display order
#[derive(Debug, Serialize)]
pub struct ActionsResponse {
    pub actions: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
