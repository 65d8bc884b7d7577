//! sfo_dump - Print the contents of a PARAM.SFO file
//!
//! Usage:
//!   cargo run --release --bin sfo_dump -- [OPTIONS] <FILE>

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use paramsfo::report;
use paramsfo::storage;

#[derive(Parser)]
#[command(name = "sfo_dump", about = "Parse a PARAM.SFO file and print its attributes", version)]
struct Cli {
    /// PARAM.SFO file to read
    file: PathBuf,

    /// Show header and every entry, and enable info logs
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Output in JSON format
    #[arg(long, short = 'j')]
    json: bool,
}

fn init_tracing(verbose: bool) {
    // RUST_LOG wins when set; otherwise --verbose selects info, default warn
    let default = if verbose { "info" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (header, doc) = storage::inspect_file(&cli.file)
        .with_context(|| format!("parsing PARAM.SFO {}", cli.file.display()))?;
    info!(file = %cli.file.display(), entries = doc.len(), "parsed");

    if cli.json {
        println!("{}", report::render_json(&header, &doc)?);
    } else {
        print!("{}", report::render_text(&header, &doc, cli.verbose)?);
    }
    Ok(())
}
