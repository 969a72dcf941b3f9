//! Error types for Avatar.
//!
//! Provider failures that come back over the wire (transport errors, non-200
//! responses) are not errors here: they are carried as
//! [`GenerationResult::Failure`](crate::types::GenerationResult) so callers can
//! relay the provider's own status code. The enums below cover what stops a
//! generation before or outside that exchange.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Avatar operations.
#[derive(Error, Debug)]
pub enum AvatarError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Provider setup or capability errors
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Input image does not exist
    #[error("Image file not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    /// Provider selection names no known provider
    #[error("unknown provider: {0} (expected HUGGING_FACE or OPENAI)")]
    UnknownProvider(String),

    /// Hugging Face selected without an API token
    #[error("missing token: HF_API_TOKEN is not set for the Hugging Face provider")]
    MissingToken,

    /// Hugging Face selected without a model id
    #[error("missing model id: HF_MODEL_ID is not set for the Hugging Face provider")]
    MissingModelId,

    /// OpenAI selected without an API key
    #[error("missing alternative key: OPENAI_API_KEY is not set for the OpenAI provider")]
    MissingAlternativeKey,
}

/// Errors raised by a provider itself rather than by the remote service.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The provider exists in configuration but has no working backend yet
    #[error("{provider} video generation not yet implemented")]
    NotImplemented { provider: String },
}

/// Convenience type alias for Avatar results.
pub type Result<T> = std::result::Result<T, AvatarError>;
