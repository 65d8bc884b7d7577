//! sfo_generate - Write fictional game folders with PARAM.SFO files
//!
//! Layout:
//!   `<output>/<Title> [<TITLE_ID>]/PS3_GAME/PARAM.SFO`
//!   `<output>/<Title> [<TITLE_ID>]/PS3_DISC.SFB`
//!
//! Usage:
//!   cargo run --release --bin sfo_generate -- --output test-games --count 5 --clean

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{ensure, Context};
use clap::Parser;
use tracing::{debug, info};

use paramsfo::fixtures::SAMPLE_GAMES;
use paramsfo::{EncodeConfig, SlotPolicy};

#[derive(Parser)]
#[command(name = "sfo_generate", about = "Generate fake game folders for testing", version)]
struct Cli {
    /// Output directory
    #[arg(long, short = 'o', default_value = "test-games")]
    output: PathBuf,

    /// Number of games to generate
    #[arg(long, short = 'n', default_value_t = 5)]
    count: usize,

    /// Reserve each entry's max length in the data table
    #[arg(long)]
    reserved: bool,

    /// Remove the output directory before generating
    #[arg(long)]
    clean: bool,

    /// Enable debug logs
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();

    ensure!(
        (1..=SAMPLE_GAMES.len()).contains(&cli.count),
        "count must be between 1 and {}",
        SAMPLE_GAMES.len()
    );

    let policy = if cli.reserved {
        SlotPolicy::Reserved
    } else {
        SlotPolicy::Compact
    };

    if cli.clean {
        match fs::remove_dir_all(&cli.output) {
            Ok(()) => debug!(output = %cli.output.display(), "cleaned"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| format!("removing {}", cli.output.display()))
            }
        }
    }
    fs::create_dir_all(&cli.output)
        .with_context(|| format!("creating {}", cli.output.display()))?;

    let config = EncodeConfig::default().slot_policy(policy);
    for game in &SAMPLE_GAMES[..cli.count] {
        let game_dir = game
            .write_to(&cli.output, config.clone())
            .with_context(|| format!("writing {}", game.dir_name()))?;

        debug!(path = %game_dir.display(), title_id = game.title_id, "generated");
        info!("{} [{}]", game.title, game.title_id);
    }

    info!(count = cli.count, output = %cli.output.display(), "done");
    Ok(())
}
