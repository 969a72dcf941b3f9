//! OpenAI video provider.
//!
//! Selectable in configuration but not wired to an API yet: every call fails
//! with [`ProviderError::NotImplemented`] so callers can tell "not built" apart
//! from "not configured" or "remote failed".

use super::VideoProvider;
use crate::config::ProviderKind;
use crate::error::ProviderError;
use crate::types::{GenerationRequest, GenerationResult};
use async_trait::async_trait;
use std::time::Duration;

pub struct OpenAiProvider {
    // Held for the real client; unused until then.
    _api_key: String,
    timeout: Duration,
}

impl OpenAiProvider {
    pub fn new(api_key: &str, timeout: Duration) -> Self {
        Self {
            _api_key: api_key.to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl VideoProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    fn kind(&self) -> ProviderKind {
        ProviderKind::OpenAi
    }

    async fn generate(
        &self,
        _request: &GenerationRequest,
    ) -> Result<GenerationResult, ProviderError> {
        tracing::warn!("OpenAI video generation requested but not implemented");
        Err(ProviderError::NotImplemented {
            provider: self.name().to_string(),
        })
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }
}
