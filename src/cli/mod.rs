//! Command-line interface for repo-dump
//!
//! Provides `dump` and `ls` subcommands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod dump;
mod utils;

/// Dump a repository into a single framed text stream for LLM prompting
#[derive(Parser)]
#[command(name = "repo-dump")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write every kept text file as a framed stream
    Dump(dump::DumpArgs),

    /// List the files a dump would include, without their contents
    Ls(dump::DumpArgs),
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins when set; otherwise --verbose picks debug over warn.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    match cli.command {
        Commands::Dump(args) => dump::run(args),
        Commands::Ls(args) => dump::run_list(args),
    }
}
