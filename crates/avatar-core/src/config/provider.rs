//! Provider selection and credentials, resolved from the environment.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Selects the provider (`HUGGING_FACE` or `OPENAI`, case-insensitive).
pub const ENV_PROVIDER: &str = "VIDEO_GENERATION_PROVIDER";
/// Hugging Face Inference API token.
pub const ENV_HF_API_TOKEN: &str = "HF_API_TOKEN";
/// Hugging Face model id, e.g. `org/image-to-video`.
pub const ENV_HF_MODEL_ID: &str = "HF_MODEL_ID";
/// OpenAI API key.
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Supported video generation providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Hugging Face Inference API
    HuggingFace,
    /// OpenAI (no backend yet)
    #[serde(rename = "openai")]
    OpenAi,
}

impl ProviderKind {
    /// Parse a provider name (case-insensitive, surrounding whitespace ignored).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "HUGGING_FACE" => Some(Self::HuggingFace),
            "OPENAI" => Some(Self::OpenAi),
            _ => None,
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HuggingFace => write!(f, "hugging_face"),
            Self::OpenAi => write!(f, "openai"),
        }
    }
}

/// A validated provider selection carrying exactly the credentials it needs.
#[derive(Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    HuggingFace { api_token: String, model_id: String },
    OpenAi { api_key: String },
}

impl ProviderConfig {
    /// Resolve from the process environment.
    pub fn resolve() -> Result<Self, ConfigError> {
        Self::resolve_with(|key| std::env::var(key).ok())
    }

    /// Resolve against an arbitrary key lookup.
    ///
    /// Empty or whitespace-only values count as missing. No network activity.
    pub fn resolve_with<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let selected = lookup(ENV_PROVIDER).unwrap_or_else(|| "HUGGING_FACE".to_string());
        let kind = ProviderKind::parse(&selected)
            .ok_or_else(|| ConfigError::UnknownProvider(selected.trim().to_string()))?;

        match kind {
            ProviderKind::HuggingFace => {
                let api_token = non_empty(ENV_HF_API_TOKEN).ok_or(ConfigError::MissingToken)?;
                let model_id = non_empty(ENV_HF_MODEL_ID).ok_or(ConfigError::MissingModelId)?;
                Ok(Self::HuggingFace {
                    api_token,
                    model_id: model_id.trim().to_string(),
                })
            }
            ProviderKind::OpenAi => {
                let api_key =
                    non_empty(ENV_OPENAI_API_KEY).ok_or(ConfigError::MissingAlternativeKey)?;
                Ok(Self::OpenAi { api_key })
            }
        }
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            Self::HuggingFace { .. } => ProviderKind::HuggingFace,
            Self::OpenAi { .. } => ProviderKind::OpenAi,
        }
    }

    /// Model identifier, when the provider takes one.
    pub fn model_id(&self) -> Option<&str> {
        match self {
            Self::HuggingFace { model_id, .. } => Some(model_id),
            Self::OpenAi { .. } => None,
        }
    }
}

// Secrets stay out of logs.
impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HuggingFace { model_id, .. } => f
                .debug_struct("HuggingFace")
                .field("api_token", &"<redacted>")
                .field("model_id", model_id)
                .finish(),
            Self::OpenAi { .. } => f
                .debug_struct("OpenAi")
                .field("api_key", &"<redacted>")
                .finish(),
        }
    }
}
