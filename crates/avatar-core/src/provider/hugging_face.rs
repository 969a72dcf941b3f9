//! Hugging Face Inference API provider.
//!
//! Posts the raw image as the request body with the prompt in the query
//! string. One attempt per call; failures are returned, never retried.

use super::response::classify;
use super::VideoProvider;
use crate::config::ProviderKind;
use crate::error::ProviderError;
use crate::types::{Failure, GenerationRequest, GenerationResult};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::{Duration, Instant};

/// Hugging Face provider for image-to-video models.
pub struct HuggingFaceProvider {
    api_token: String,
    model_id: String,
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HuggingFaceProvider {
    pub fn new(base_url: &str, api_token: &str, model_id: &str, timeout: Duration) -> Self {
        let endpoint = format!(
            "{}/models/{}",
            base_url.trim_end_matches('/'),
            model_id.trim_matches('/')
        );
        Self {
            api_token: api_token.to_string(),
            model_id: model_id.to_string(),
            client: reqwest::Client::new(),
            endpoint,
            timeout,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl VideoProvider for HuggingFaceProvider {
    fn name(&self) -> &str {
        "hugging_face"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::HuggingFace
    }

    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, ProviderError> {
        let start = Instant::now();
        tracing::debug!(
            model = %self.model_id,
            image_bytes = request.image.len(),
            "Posting image to {}",
            self.endpoint
        );

        let resp = match self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_token))
            .query(&[("prompt", request.prompt.as_str())])
            .body(request.image.clone())
            .timeout(self.timeout())
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!("Hugging Face request failed: {e}");
                return Ok(GenerationResult::Failure(Failure::transport(e.to_string())));
            }
        };

        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = match resp.bytes().await {
            Ok(body) => body.to_vec(),
            Err(e) => {
                tracing::warn!("Failed to read Hugging Face response body: {e}");
                return Ok(GenerationResult::Failure(Failure::transport(e.to_string())));
            }
        };

        let result = classify(status, content_type.as_deref(), body);
        tracing::info!(
            status,
            outcome = result.label(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Hugging Face generation finished"
        );
        Ok(result)
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}
