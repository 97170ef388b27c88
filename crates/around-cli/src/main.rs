//! Around CLI - Command-line interface
//!
//! Front end for proximity discovery: drives the discovery and post ingest
//! coordinators and prints their state.

mod cli;
mod commands;
mod context;
mod errors;
mod output;
mod output_types;
mod progress;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() {
    // Logs go to stderr so that --json output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        errors::report(err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(commands::execute(cli))
}
