//! HEXTRI Core - Hex grid coverage engine
//!
//! This crate provides the core logic for HEXTRI:
//! - Grid geometry (odd-r offset positions, cube coordinates, hex distance)
//! - Coverage engine (number ranges, per-cell source sets, intersections)
//! - Board commands (set, clear, move numbers)
//! - Snapshot persistence behind a key-value store

pub mod error;
pub mod grid;
pub mod coverage;
pub mod board;
pub mod store;

// Re-exports for convenient access
pub use error::GridError;
pub use grid::{GridPos, Cube, ROWS, TOTAL_CELLS, cols_for_row, all_positions, distance, cells_at_distance};
pub use coverage::{CoverageMap, Intersections, Threshold, range_of, compute_intersections};
pub use board::{Board, Cell, AnnotatedCell, checked_number};
pub use store::{KeyValueStore, MemoryStore, FileStore, Snapshot, SavedCell, save_board, save_snapshot, load_board};
