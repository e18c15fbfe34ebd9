//! Random command - write a board with randomly placed numbers

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use rand::Rng;

use hextri_core::Board;

#[derive(Args)]
pub struct RandomArgs {
    /// How many cells get a number
    #[arg(long, default_value = "8")]
    pub count: usize,

    /// Random seed for reproducibility (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where to write the snapshot
    #[arg(long)]
    pub output: PathBuf,
}

pub fn run(args: RandomArgs) -> Result<()> {
    let seed = args.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let board = Board::seeded(seed, args.count);

    board.snapshot().save(&args.output)?;

    tracing::info!(
        "Wrote {} numbered cells to {} (seed {})",
        board.numbered().count(),
        args.output.display(),
        seed
    );
    Ok(())
}
