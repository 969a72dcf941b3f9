//! Classification of provider responses by declared content type.
//!
//! Some models stream video bytes back, others answer with a JSON document
//! (usually pointing at a hosted file). The `Content-Type` header is the only
//! reliable discriminator.

use crate::types::{video_reference, BinaryMedia, Failure, GenerationResult};

/// Classify a completed HTTP exchange.
///
/// * anything but 200: `Failure` with the status and the raw body, unparsed
/// * `application/json`: `StructuredMetadata`, document passed through as-is
/// * anything else: `BinaryMedia`, defaulting the type to `video/mp4`
pub fn classify(status: u16, content_type: Option<&str>, body: Vec<u8>) -> GenerationResult {
    if status != 200 {
        let message = String::from_utf8_lossy(&body).into_owned();
        return GenerationResult::Failure(Failure::provider(status, message));
    }

    let is_json = content_type
        .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false);

    if is_json {
        return match serde_json::from_slice(&body) {
            Ok(document) => {
                match video_reference(&document) {
                    Some(reference) => tracing::info!("Provider returned video reference: {reference}"),
                    None => tracing::debug!("Provider JSON response has no video reference"),
                }
                GenerationResult::StructuredMetadata(document)
            }
            Err(e) => GenerationResult::Failure(Failure::provider(
                502,
                format!("Provider declared JSON but body did not parse: {e}"),
            )),
        };
    }

    GenerationResult::BinaryMedia(BinaryMedia::new(body, content_type))
}
