//! Routes a generation request to the configured provider.

use crate::config::{InferenceConfig, ProviderConfig, ProviderKind};
use crate::error::ProviderError;
use crate::provider::{ProviderFactory, VideoProvider};
use crate::types::{GenerationRequest, GenerationResult};
use std::time::Instant;

/// Owns the provider selected at startup. Holds no per-request state, so one
/// instance can serve concurrent requests.
pub struct Dispatcher {
    provider: Box<dyn VideoProvider>,
    model_id: Option<String>,
}

impl Dispatcher {
    /// Build the dispatcher for a resolved provider configuration.
    pub fn new(config: &ProviderConfig, inference: &InferenceConfig) -> Result<Self, ProviderError> {
        let provider = ProviderFactory::create(config, inference)?;
        Ok(Self {
            provider,
            model_id: config.model_id().map(String::from),
        })
    }

    /// Wrap an already-built provider.
    pub fn with_provider(provider: Box<dyn VideoProvider>) -> Self {
        Self {
            provider,
            model_id: None,
        }
    }

    pub fn provider_kind(&self) -> ProviderKind {
        self.provider.kind()
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model_id(&self) -> Option<&str> {
        self.model_id.as_deref()
    }

    /// Run one generation against the selected provider.
    pub async fn dispatch(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, ProviderError> {
        let start = Instant::now();
        tracing::info!(
            provider = self.provider.name(),
            model = self.model_id.as_deref().unwrap_or("-"),
            prompt_chars = request.prompt.chars().count(),
            "Dispatching generation"
        );

        let result = self.provider.generate(request).await;

        match &result {
            Ok(GenerationResult::BinaryMedia(media)) => tracing::info!(
                bytes = media.size(),
                content_type = %media.content_type,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Received video"
            ),
            Ok(GenerationResult::StructuredMetadata(_)) => tracing::info!(
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Received JSON metadata"
            ),
            Ok(GenerationResult::Failure(failure)) => tracing::warn!(
                status = failure.status,
                kind = ?failure.kind,
                "Generation failed: {}",
                failure.message
            ),
            Err(e) => tracing::warn!("Provider could not run: {e}"),
        }

        result
    }
}
