//! Avatar Core - turn a still image and a prompt into a video.
//!
//! Avatar is glue around a hosted image-to-video model: it resolves which
//! provider to use, posts the image and prompt, and classifies what comes back.
//!
//! ```text
//! Config → Dispatcher → Provider (Hugging Face | OpenAI) → classify → persist / pass through
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use avatar_core::{Config, Dispatcher, GenerationRequest, GenerationResult, ProviderConfig};
//!
//! #[tokio::main]
//! async fn main() -> avatar_core::Result<()> {
//!     let config = Config::load()?;
//!     let provider = ProviderConfig::resolve()?;
//!     let dispatcher = Dispatcher::new(&provider, &config.inference)?;
//!
//!     let request = GenerationRequest::new(std::fs::read("face.png")?, "smile and wave");
//!     if let GenerationResult::BinaryMedia(media) = dispatcher.dispatch(&request).await? {
//!         avatar_core::output::persist(&media, &config.cli_output_path()).await?;
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod output;
pub mod provider;
pub mod types;

pub use config::{Config, ProviderConfig, ProviderKind};
pub use dispatch::Dispatcher;
pub use error::{AvatarError, ConfigError, ProviderError, Result};
pub use output::PersistedFile;
pub use provider::VideoProvider;
pub use types::{BinaryMedia, Failure, FailureKind, GenerationRequest, GenerationResult};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
