//! HTTP image generation client

use super::error::ImageError;
use super::types::{ErrorBody, GenerateRequest, GenerateResponse};
use crate::runtime::traits::ImageClient;
use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use std::time::Duration;

pub struct HttpImageClient {
    client: Client,
    url: String,
}

impl HttpImageClient {
    /// Without a timeout a request waits for as long as the server takes
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> reqwest::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url: url.into(),
        })
    }

    fn classify_error(status: reqwest::StatusCode, body: &str) -> ImageError {
        let err = ImageError::status(format!("HTTP {status}: {body}"));
        match serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail_text())
        {
            Some(detail) => err.with_detail(detail),
            None => err,
        }
    }

    fn parse_image(body: &str) -> Result<String, ImageError> {
        let response: GenerateResponse = serde_json::from_str(body).map_err(|e| {
            ImageError::malformed(format!("Failed to parse response: {e}"))
        })?;

        if response.image.is_empty() {
            return Err(ImageError::malformed("Response contained an empty image"));
        }
        base64::engine::general_purpose::STANDARD
            .decode(&response.image)
            .map_err(|e| ImageError::malformed(format!("Image is not valid base64: {e}")))?;

        Ok(response.image)
    }
}

#[async_trait]
impl ImageClient for HttpImageClient {
    async fn generate(&self, prompt: &str) -> Result<String, ImageError> {
        let response = self
            .client
            .post(&self.url)
            .json(&GenerateRequest { prompt })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ImageError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    ImageError::network(format!("Connection failed: {e}"))
                } else {
                    ImageError::network(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ImageError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_error(status, &body));
        }

        Self::parse_image(&body)
    }
}
