//! Video generation providers.
//!
//! Each provider implements [`VideoProvider`]; [`ProviderFactory`] builds the
//! one selected by a resolved [`ProviderConfig`].

pub(crate) mod hugging_face;
pub(crate) mod openai;
pub(crate) mod response;

pub use hugging_face::HuggingFaceProvider;
pub use openai::OpenAiProvider;
pub use response::classify;

use crate::config::{InferenceConfig, ProviderConfig, ProviderKind};
use crate::error::ProviderError;
use crate::types::{GenerationRequest, GenerationResult};
use async_trait::async_trait;
use std::time::Duration;

/// Trait that all video providers implement.
///
/// Uses `async_trait` because native async fn in trait is not object-safe
/// (we need `Box<dyn VideoProvider>` for dynamic dispatch).
#[async_trait]
pub trait VideoProvider: Send + Sync {
    /// Provider name for logging (e.g., "hugging_face").
    fn name(&self) -> &str;

    fn kind(&self) -> ProviderKind;

    /// Run one generation.
    ///
    /// Remote failures come back as [`GenerationResult::Failure`]; `Err` is
    /// reserved for the provider being unable to act at all.
    async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, ProviderError>;

    /// Per-request timeout for this provider.
    fn timeout(&self) -> Duration;
}

/// Factory that creates the provider matching a resolved configuration.
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create(
        provider: &ProviderConfig,
        inference: &InferenceConfig,
    ) -> Result<Box<dyn VideoProvider>, ProviderError> {
        match provider {
            ProviderConfig::HuggingFace {
                api_token,
                model_id,
            } => Ok(Box::new(HuggingFaceProvider::new(
                &inference.base_url,
                api_token,
                model_id,
                inference.timeout(),
            ))),
            ProviderConfig::OpenAi { api_key } => Ok(Box::new(OpenAiProvider::new(
                api_key,
                inference.timeout(),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_builds_hugging_face() {
        let config = ProviderConfig::HuggingFace {
            api_token: "t".into(),
            model_id: "org/i2v".into(),
        };
        let provider = ProviderFactory::create(&config, &InferenceConfig::default()).unwrap();
        assert_eq!(provider.kind(), ProviderKind::HuggingFace);
        assert_eq!(provider.name(), "hugging_face");
        assert_eq!(provider.timeout(), Duration::from_secs(600));
    }

    #[test]
    fn test_factory_builds_openai() {
        let config = ProviderConfig::OpenAi {
            api_key: "sk-1".into(),
        };
        let provider = ProviderFactory::create(&config, &InferenceConfig::default()).unwrap();
        assert_eq!(provider.kind(), ProviderKind::OpenAi);
    }

    #[test]
    fn test_factory_applies_timeout() {
        let config = ProviderConfig::HuggingFace {
            api_token: "t".into(),
            model_id: "m".into(),
        };
        let inference = InferenceConfig {
            timeout_secs: 30,
            ..InferenceConfig::default()
        };
        let provider = ProviderFactory::create(&config, &inference).unwrap();
        assert_eq!(provider.timeout(), Duration::from_secs(30));

        let config = ProviderConfig::OpenAi {
            api_key: "sk-1".into(),
        };
        let provider = ProviderFactory::create(&config, &inference).unwrap();
        assert_eq!(provider.timeout(), Duration::from_secs(30));
    }
}
