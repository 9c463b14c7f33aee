//! Conversation message types
//!
//! These are also the persisted snapshot format: a JSON array of `Message`.

use serde::{Deserialize, Serialize};

/// Result attached to a message once its action has been processed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    Text { content: String },
    /// Base64-encoded PNG bytes
    Image { content: String },
}

impl Response {
    pub fn text(content: impl Into<String>) -> Self {
        Response::Text {
            content: content.into(),
        }
    }

    pub fn image(content: impl Into<String>) -> Self {
        Response::Image {
            content: content.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Response::Text { .. } => "text",
            Response::Image { .. } => "image",
        }
    }
}

/// One user submission plus its optional response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Correlation key between the request and its eventual response
    pub id: String,
    pub text: String,
    /// Action label exactly as submitted; absent means plain echo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<Response>,
    /// Creation time in epoch milliseconds
    pub timestamp: i64,
}

impl Message {
    pub fn has_response(&self) -> bool {
        self.response.is_some()
    }

    /// Short human-readable form of the response, for logs and plain-text views
    pub fn response_summary(&self) -> String {
        match &self.response {
            None => "[pending]".to_string(),
            Some(Response::Text { content }) => content.clone(),
            Some(Response::Image { content }) => format!("[image: {} base64 chars]", content.len()),
        }
    }
}
