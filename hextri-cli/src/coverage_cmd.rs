//! Coverage command - report intersections for a saved board
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_board(), build_report()
//! - Level 3: format_text()

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use hextri_core::{Board, CoverageMap, GridPos, Intersections, Snapshot, Threshold};

use crate::server::threshold_for;

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct CoverageArgs {
    /// Board snapshot (JSON)
    #[arg(long)]
    pub board: PathBuf,

    /// Flag cells covered by exactly three sources instead of three or more
    #[arg(long)]
    pub exact: bool,

    /// Print the full report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Everything the command knows about one board
#[derive(Debug, Serialize)]
pub struct CoverageReport {
    pub threshold: Threshold,
    pub numbered: Vec<(GridPos, u8)>,
    pub covered: CoverageMap,
    pub intersections: Intersections,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: CoverageArgs) -> Result<()> {
    let board = load_board(&args)?;
    let report = build_report(&board, threshold_for(args.exact));

    tracing::info!(
        "{} numbered cells, {} covered, {} intersections",
        report.numbered.len(),
        report.covered.len(),
        report.intersections.len()
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_text(&report));
    }
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_board(args: &CoverageArgs) -> Result<Board> {
    let snapshot = Snapshot::load(&args.board)?;
    Ok(Board::from_snapshot(&snapshot))
}

pub fn build_report(board: &Board, threshold: Threshold) -> CoverageReport {
    let covered = board.coverage();
    let intersections = covered.intersections(threshold);

    CoverageReport {
        threshold,
        numbered: board
            .numbered()
            .filter_map(|c| c.number.map(|n| (c.pos, n)))
            .collect(),
        covered,
        intersections,
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

pub fn format_text(report: &CoverageReport) -> String {
    let mut out = String::new();

    if report.intersections.is_empty() {
        out.push_str("No intersections\n");
        return out;
    }

    for (pos, sources) in &report.intersections {
        let sources: Vec<String> = sources.iter().map(GridPos::id).collect();
        out.push_str(&format!("{}: {}\n", pos, sources.join(", ")));
    }
    out
}
