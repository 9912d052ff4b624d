//! CLI entry point for knitting pattern generation

use clap::Parser;
use knitgen::io::cli::{Cli, FileProcessor};
use tracing_subscriber::EnvFilter;

fn main() -> knitgen::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut processor = FileProcessor::new(cli);
    processor.process()?;
    Ok(())
}
