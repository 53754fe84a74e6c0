//! CLI frontend for the Roomwalker text adventure.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "rw",
    about = "Roomwalker: walk a grid of rooms and move things around",
    version
)]
struct Cli {
    /// Directory holding rooms.json and the other content files
    #[arg(short, long, default_value = "worlds/manor")]
    world: PathBuf,

    /// ID of the room to start in
    #[arg(long, default_value = "rm_0307")]
    start: String,

    /// RNG seed for reproducible flavor text
    #[arg(short, long, default_value = "42")]
    seed: u64,

    /// Column width to wrap narration to
    #[arg(long, default_value = "78")]
    width: usize,

    /// Player name (skips the prompt)
    #[arg(short, long)]
    name: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let options = commands::play::PlayOptions {
        world: cli.world,
        start: cli.start,
        seed: cli.seed,
        width: cli.width,
        name: cli.name,
    };

    if let Err(e) = commands::play::run(&options) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
