use clap::Parser;
use tracing_subscriber::EnvFilter;

mod align;
mod args;
mod audio;
mod config;
mod error;
mod ffmpeg;
mod normalize;
mod orchestrator;
mod render;
mod sampler;
mod splitter;
mod subtitle;
mod tts;
mod utils;

use args::{Args, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    match args.command {
        Command::Render(render_args) => orchestrator::render_all(&render_args.into_config()).await,
        Command::Split(split_args) => splitter::split_all(&split_args.into_config()),
    }
}
