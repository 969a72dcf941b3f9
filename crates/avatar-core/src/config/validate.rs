//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.inference.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "inference.base_url must not be empty".into(),
            ));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::ValidationError(format!(
                "inference.base_url must be an http(s) URL, got '{base_url}'"
            )));
        }
        if self.inference.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "inference.timeout_secs must be > 0".into(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "server.port must be > 0".into(),
            ));
        }
        if self.server.max_upload_mb == 0 {
            return Err(ConfigError::ValidationError(
                "server.max_upload_mb must be > 0".into(),
            ));
        }
        if self.server.max_upload_bytes().is_none() {
            return Err(ConfigError::ValidationError(format!(
                "server.max_upload_mb is too large: {}",
                self.server.max_upload_mb
            )));
        }
        if self.output.cli_file.trim().is_empty() || self.output.api_file_stem.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "output.cli_file and output.api_file_stem must not be empty".into(),
            ));
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be 'pretty' or 'json', got '{}'",
                self.logging.format
            )));
        }
        Ok(())
    }
}
