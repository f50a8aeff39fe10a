//! Creature arena client binary.
//!
//! Composition root: loads content, builds the runtime with AI providers on
//! both sides, and autoplays one battle.
//!
//! ```bash
//! cargo run -p arena-client -- --difficulty hard --seed 42
//! RUST_LOG=arena_runtime=debug cargo run -p arena-client -- --quiet --json
//! ```

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use arena_client::{Client, ClientConfig, Output, setup};
use arena_content::ContentFactory;
use arena_core::Difficulty;
use arena_runtime::{AiProvider, Runtime, RuntimeConfig};

/// Autoplay a creature battle between two AI sides.
#[derive(Parser)]
#[command(name = "arena")]
#[command(about = "Headless creature battle runner", long_about = None)]
#[command(version)]
struct Cli {
    /// easy, medium, hard or expert (default: $ARENA_DIFFICULTY or medium)
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Seed for opponent generation and AI rolls (default: $ARENA_SEED or 0)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Content directory (default: $ARENA_DATA_DIR or ./data)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,

    /// Do not stream the battle log
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env();
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    config.json_summary |= cli.json;
    config.quiet |= cli.quiet;

    let mut runtime_config = RuntimeConfig::from_env();
    if let Some(seed) = cli.seed {
        runtime_config.seed = seed;
    }
    let seed = runtime_config.seed;

    tracing::info!(
        difficulty = %config.difficulty,
        seed,
        data_dir = %config.data_dir.display(),
        "Starting arena client"
    );

    let factory = ContentFactory::new(&config.data_dir);
    let start = setup::start_action(&factory, config.difficulty, seed)?;

    let runtime = Runtime::builder()
        .config(runtime_config)
        .human_provider(AiProvider::new(seed))
        .opponent_provider(AiProvider::new(seed.wrapping_add(1)))
        .build();

    let client = Client::builder()
        .runtime(runtime)
        .start(start)
        .output(Output {
            feed: !config.quiet,
            json_summary: config.json_summary,
        })
        .build()?;

    let summary = client.run().await?;
    tracing::info!(outcome = %summary.outcome, turns = summary.turns, "Client finished");
    Ok(())
}
