//! The `avatar generate` command.

use anyhow::Context;
use avatar_core::output::persist;
use avatar_core::{
    AvatarError, Config, Dispatcher, GenerationRequest, GenerationResult, PersistedFile,
    ProviderConfig,
};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the avatar image (PNG/JPEG)
    #[arg(long)]
    pub image: PathBuf,

    /// Text prompt driving the video generation
    #[arg(long)]
    pub prompt: String,

    /// Where to save the video if the model returns bytes [default: output/video.mp4]
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// What a successful run produced.
#[derive(Debug)]
pub(crate) enum GenerateOutcome {
    Saved(PersistedFile),
    Metadata(serde_json::Value),
}

/// Execute the generate command.
pub async fn execute(args: GenerateArgs, config: &Config) -> anyhow::Result<()> {
    match run(&args, config, |key| std::env::var(key).ok()).await? {
        GenerateOutcome::Saved(file) => {
            println!("Saved generated video to: {}", file.path.display());
        }
        GenerateOutcome::Metadata(document) => {
            eprintln!("Model returned a JSON response instead of video bytes:");
            println!("{}", serde_json::to_string_pretty(&document)?);
            eprintln!(
                "If a video URL is present above, download it manually; nothing was written to disk."
            );
        }
    }
    Ok(())
}

/// Validate inputs, dispatch once, and handle the result.
///
/// The image is checked before configuration is resolved, and both happen
/// before any network activity.
pub(crate) async fn run<F>(
    args: &GenerateArgs,
    config: &Config,
    lookup: F,
) -> anyhow::Result<GenerateOutcome>
where
    F: Fn(&str) -> Option<String>,
{
    if !args.image.exists() {
        return Err(AvatarError::ImageNotFound(args.image.clone()).into());
    }

    let provider = ProviderConfig::resolve_with(lookup).map_err(AvatarError::from)?;
    let dispatcher = Dispatcher::new(&provider, &config.inference).map_err(AvatarError::from)?;

    let image = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("Failed to read image {}", args.image.display()))?;
    tracing::info!(
        "Generating with {} from {}",
        dispatcher.provider_name(),
        args.image.display()
    );

    let request = GenerationRequest::new(image, args.prompt.clone());
    match dispatcher
        .dispatch(&request)
        .await
        .map_err(AvatarError::from)?
    {
        GenerationResult::BinaryMedia(media) => {
            let destination = args
                .output
                .clone()
                .unwrap_or_else(|| config.cli_output_path());
            let file = persist(&media, &destination)
                .await
                .with_context(|| format!("Failed to write {}", destination.display()))?;
            Ok(GenerateOutcome::Saved(file))
        }
        GenerationResult::StructuredMetadata(document) => Ok(GenerateOutcome::Metadata(document)),
        GenerationResult::Failure(failure) => anyhow::bail!(
            "Inference API error {}: {}",
            failure.status,
            failure.message
        ),
    }
}
