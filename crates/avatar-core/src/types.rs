//! Request and result types shared by providers, the dispatcher, and callers.

use serde::Serialize;
use serde_json::Value;

/// Fallback media type when a provider returns bytes without a content type.
pub const DEFAULT_VIDEO_CONTENT_TYPE: &str = "video/mp4";

/// A single image-to-video request.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Raw image bytes, sent to the provider unmodified
    pub image: Vec<u8>,
    /// Text prompt driving the generation
    pub prompt: String,
}

impl GenerationRequest {
    pub fn new(image: Vec<u8>, prompt: impl Into<String>) -> Self {
        Self {
            image,
            prompt: prompt.into(),
        }
    }
}

/// Video bytes returned directly by a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMedia {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl BinaryMedia {
    /// Build from a response body, falling back to `video/mp4` when the
    /// provider did not declare a type.
    pub fn new(bytes: Vec<u8>, content_type: Option<&str>) -> Self {
        let content_type = content_type
            .map(str::trim)
            .filter(|ct| !ct.is_empty())
            .unwrap_or(DEFAULT_VIDEO_CONTENT_TYPE);
        Self {
            bytes,
            content_type: content_type.to_string(),
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// File extension matching the media type (without the dot).
    pub fn extension(&self) -> &'static str {
        let essence = self
            .content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "video/webm" => "webm",
            "image/gif" => "gif",
            "video/quicktime" => "mov",
            _ => "mp4",
        }
    }
}

/// Where a failure originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Connection error, timeout, or unreadable body
    Transport,
    /// The provider answered with an error status or an unusable body
    Provider,
}

/// A provider call that did not produce media or metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// HTTP status to relay to the caller
    pub status: u16,
    /// Provider body or underlying error text, unmodified
    pub message: String,
    pub kind: FailureKind,
}

impl Failure {
    /// A transport failure, always reported as 500.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: 500,
            message: message.into(),
            kind: FailureKind::Transport,
        }
    }

    /// A non-success response, keeping the provider's status and raw body.
    pub fn provider(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            kind: FailureKind::Provider,
        }
    }
}

/// Outcome of a single generation call.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    /// The provider streamed the video back
    BinaryMedia(BinaryMedia),
    /// The provider returned a JSON document (often containing a video URL)
    StructuredMetadata(Value),
    /// The call failed; see [`FailureKind`]
    Failure(Failure),
}

impl GenerationResult {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BinaryMedia(_) => "binary",
            Self::StructuredMetadata(_) => "metadata",
            Self::Failure(_) => "failure",
        }
    }
}

/// Best-effort lookup of a video reference in a provider's JSON document.
///
/// Checks `video.url`, then a string `output`. Never fails; used for logging.
pub fn video_reference(document: &Value) -> Option<&str> {
    document
        .get("video")
        .and_then(|video| video.get("url"))
        .and_then(Value::as_str)
        .or_else(|| document.get("output").and_then(Value::as_str))
}
