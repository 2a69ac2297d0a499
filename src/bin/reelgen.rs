//! CLI for reelgen - prompt-to-video generation.

use clap::{Parser, ValueEnum};
use reelgen::{
    CancellationToken, ImageInput, Orchestrator, ProgressSender, VideoModel, VideoRequest,
};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "reelgen")]
#[command(about = "Generate a video from a text prompt via Google's Veo API")]
#[command(version)]
struct Cli {
    /// The text prompt describing the video
    prompt: String,

    /// Seed image for image-to-video generation (PNG, JPEG or WebP)
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Output file path
    #[arg(short, long, default_value = "output.mp4")]
    output: PathBuf,

    /// API key (falls back to GOOGLE_API_KEY)
    #[arg(long)]
    api_key: Option<String>,

    /// Model to use
    #[arg(long, value_enum, default_value = "veo3")]
    model: ModelArg,

    /// Seconds between status checks
    #[arg(long, default_value_t = 10)]
    poll_interval: u64,

    /// Maximum seconds to wait for generation
    #[arg(long, default_value_t = 600)]
    timeout: u64,

    /// Suppress progress output
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModelArg {
    Veo3,
    Veo2,
}

impl From<ModelArg> for VideoModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Veo3 => VideoModel::Veo3,
            ModelArg::Veo2 => VideoModel::Veo2,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> reelgen::Result<()> {
    let mut builder = Orchestrator::builder()
        .model(cli.model.into())
        .poll_interval(Duration::from_secs(cli.poll_interval))
        .max_wait(Duration::from_secs(cli.timeout));
    if let Some(key) = cli.api_key {
        builder = builder.api_key(key);
    }
    let orchestrator = builder.build()?;

    let mut request = VideoRequest::new(cli.prompt);
    if let Some(path) = &cli.image {
        request = request.with_image(ImageInput::from_path(path).await?);
    }

    let (progress, mut events) = ProgressSender::channel(16);
    if !cli.quiet {
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                eprintln!("{event}");
            }
        });
    }

    // Ctrl-C stops polling at the next suspension point.
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_cancel.cancel();
        }
    });

    let video = orchestrator.generate_with(&request, &progress, &cancel).await?;
    video.save(&cli.output)?;
    println!("Saved {} bytes to {}", video.size(), cli.output.display());

    Ok(())
}
