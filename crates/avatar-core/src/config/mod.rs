//! Configuration management for Avatar.
//!
//! Non-secret settings come from an optional TOML file with defaults for every
//! field. Provider selection and credentials come from the environment only;
//! see [`ProviderConfig`].

mod provider;
mod types;
mod validate;

pub use provider::{
    ProviderConfig, ProviderKind, ENV_HF_API_TOKEN, ENV_HF_MODEL_ID, ENV_OPENAI_API_KEY,
    ENV_PROVIDER,
};
pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for Avatar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote inference settings
    pub inference: InferenceConfig,

    /// HTTP server settings
    pub server: ServerConfig,

    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.avatar.avatar/config.toml
    /// - Linux: ~/.config/avatar/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\avatar\config\config.toml
    ///
    /// Falls back to ~/.avatar/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "avatar", "avatar")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".avatar").join("config.toml")
            })
    }

    /// Resolved output directory (with ~ expansion).
    pub fn output_dir(&self) -> PathBuf {
        let path_str = self.output.dir.to_string_lossy();
        let expanded = shellexpand::tilde(&path_str);
        PathBuf::from(expanded.into_owned())
    }

    /// Default destination for `avatar generate`.
    pub fn cli_output_path(&self) -> PathBuf {
        self.output_dir().join(&self.output.cli_file)
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}
