//! Persisting generated videos to disk.
//!
//! Writes overwrite any existing file at the destination. The HTTP path gets a
//! fresh request-scoped name unless `output.unique_api_files` is off, in which
//! case concurrent requests share (and overwrite) one file.

use crate::config::Config;
use crate::types::BinaryMedia;
use std::io;
use std::path::{Path, PathBuf};

/// A video written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedFile {
    pub path: PathBuf,
    pub content_type: String,
    pub bytes_written: usize,
}

/// Write `media` to `destination`, creating parent directories as needed.
pub async fn persist(media: &BinaryMedia, destination: &Path) -> io::Result<PersistedFile> {
    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    if tokio::fs::try_exists(destination).await.unwrap_or(false) {
        tracing::debug!("Overwriting existing file {}", destination.display());
    }
    tokio::fs::write(destination, &media.bytes).await?;
    tracing::info!(
        bytes = media.size(),
        "Saved generated video to {}",
        destination.display()
    );

    Ok(PersistedFile {
        path: destination.to_path_buf(),
        content_type: media.content_type.clone(),
        bytes_written: media.size(),
    })
}

/// 16 lowercase hex characters, unique enough to keep concurrent requests apart.
pub fn request_token() -> String {
    format!("{:016x}", rand::random::<u64>())
}

/// Destination for a video produced through the HTTP endpoint.
pub fn api_output_path(config: &Config, media: &BinaryMedia) -> PathBuf {
    let stem = &config.output.api_file_stem;
    let file_name = if config.output.unique_api_files {
        format!("{stem}-{}.{}", request_token(), media.extension())
    } else {
        format!("{stem}.{}", media.extension())
    };
    config.output_dir().join(file_name)
}
