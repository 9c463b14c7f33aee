//! Remote image generation
//!
//! A single POST to the configured endpoint with `{"prompt": ...}`, answered
//! by `{"image": <base64 PNG>}`.

mod client;
mod error;
mod types;

pub use client::HttpImageClient;
#[allow(unused_imports)] // Used in tests
pub use error::{ImageError, ImageErrorKind};

use crate::runtime::traits::ImageClient;
use async_trait::async_trait;
use std::sync::Arc;

/// Wrapper that logs every image request
pub struct LoggingImageClient {
    inner: Arc<dyn ImageClient>,
}

impl LoggingImageClient {
    pub fn new(inner: Arc<dyn ImageClient>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ImageClient for LoggingImageClient {
    async fn generate(&self, prompt: &str) -> Result<String, ImageError> {
        let start = std::time::Instant::now();
        let result = self.inner.generate(prompt).await;
        let duration = start.elapsed();

        match &result {
            Ok(image) => {
                tracing::info!(
                    duration_ms = %duration.as_millis(),
                    prompt_chars = prompt.chars().count(),
                    image_bytes = image.len(),
                    "Image request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    kind = ?e.kind,
                    "Image request failed"
                );
            }
        }

        result
    }
}
