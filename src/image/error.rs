//! Image generation error types

use thiserror::Error;

/// Text attached to a message when image generation fails
pub const FAILURE_MESSAGE: &str = "Failed to generate image. Please try again.";

/// Image generation error with classification
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ImageError {
    pub kind: ImageErrorKind,
    pub message: String,
    /// Server-supplied `detail`, shown to the user verbatim
    pub detail: Option<String>,
}

impl ImageError {
    pub fn new(kind: ImageErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ImageErrorKind::Network, message)
    }

    pub fn status(message: impl Into<String>) -> Self {
        Self::new(ImageErrorKind::Status, message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ImageErrorKind::Malformed, message)
    }

    /// Human-readable text recorded as the message's response
    pub fn failure_message(&self) -> String {
        match &self.detail {
            Some(detail) => format!("{FAILURE_MESSAGE} ({detail})"),
            None => FAILURE_MESSAGE.to_string(),
        }
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageErrorKind {
    /// Connection failures, timeouts, unreadable bodies
    Network,
    /// Non-2xx response
    Status,
    /// 2xx response without usable image content
    Malformed,
}
