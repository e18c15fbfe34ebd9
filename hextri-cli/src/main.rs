//! HEXTRI CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the HTTP API server
//! - coverage: Report intersections for a saved board
//! - random: Write a board with random numbers

mod coverage_cmd;
mod random_cmd;
mod server;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hextri")]
#[command(about = "HEXTRI hex grid coverage tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve(server::ServerArgs),
    /// Report intersections for a saved board
    Coverage(coverage_cmd::CoverageArgs),
    /// Write a board with random numbers
    Random(random_cmd::RandomArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => server::run(args),
        Commands::Coverage(args) => coverage_cmd::run(args),
        Commands::Random(args) => random_cmd::run(args),
    }
}
