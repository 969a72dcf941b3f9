//! Avatar CLI - turn a still image and a prompt into a video.
//!
//! The actual generation runs on a hosted image-to-video model; Avatar sends
//! the image, then saves the returned video or prints the provider's JSON.
//!
//! # Usage
//!
//! ```bash
//! # Generate once from the command line
//! avatar generate --image face.png --prompt "smile and wave"
//!
//! # Serve POST /generate over HTTP
//! avatar serve --port 8000
//!
//! # View configuration
//! avatar config show
//! ```
//!
//! Provider credentials come from the environment (or a `.env` file):
//! `VIDEO_GENERATION_PROVIDER`, `HF_API_TOKEN`, `HF_MODEL_ID`, `OPENAI_API_KEY`.

use clap::{Parser, Subcommand};

mod cli;
mod logging;
mod server;

#[cfg(test)]
mod test_support;

/// Avatar - image-to-video generation through a hosted inference provider.
#[derive(Parser, Debug)]
#[command(name = "avatar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a video from an image and a prompt
    Generate(cli::generate::GenerateArgs),

    /// Run the HTTP API
    Serve(cli::serve::ServeArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Must run before anything reads provider variables.
    let dotenv_loaded = dotenv::dotenv().is_ok();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match avatar_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `avatar config path`."
            );
            avatar_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Avatar v{}", avatar_core::VERSION);
    if dotenv_loaded {
        tracing::debug!("Loaded environment from .env");
    }

    match cli.command {
        Commands::Generate(args) => cli::generate::execute(args, &config).await,
        Commands::Serve(args) => cli::serve::execute(args, config).await,
        Commands::Config(args) => cli::config::execute(args).await,
    }
}
