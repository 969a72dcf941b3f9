//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Remote inference endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceConfig {
    /// Base URL; the model id is appended as `/models/<id>`
    pub base_url: String,

    /// Per-request timeout in seconds (generation is slow)
    pub timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-inference.huggingface.co".to_string(),
            timeout_secs: 600,
        }
    }
}

impl InferenceConfig {
    /// Outbound request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,

    /// Bind port
    pub port: u16,

    /// Maximum accepted upload size in megabytes
    pub max_upload_mb: usize,
}

impl ServerConfig {
    /// Upload limit in bytes, `None` if it does not fit in `usize`.
    pub fn max_upload_bytes(&self) -> Option<usize> {
        self.max_upload_mb.checked_mul(1024 * 1024)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_mb: 25,
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for generated videos
    pub dir: PathBuf,

    /// File name used by `avatar generate` when `--output` is omitted
    pub cli_file: String,

    /// File stem used by the HTTP endpoint
    pub api_file_stem: String,

    /// Give each HTTP request its own file instead of overwriting one
    pub unique_api_files: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
            cli_file: "video.mp4".to_string(),
            api_file_stem: "api_generated_video".to_string(),
            unique_api_files: true,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,

    /// Log format (pretty, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
