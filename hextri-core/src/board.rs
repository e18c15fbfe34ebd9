//! Board - the owned cell collection and the commands that mutate it
//!
//! The board is created once with one cell per grid position. Only the
//! numbers change afterwards; coverage is recomputed from scratch on demand.

use crate::coverage::{CoverageMap, Threshold, MAX_NUMBER};
use crate::error::GridError;
use crate::grid::{all_positions, GridPos, TOTAL_CELLS};
use crate::store::{SavedCell, Snapshot};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A grid cell and its optional number
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub pos: GridPos,
    pub number: Option<u8>,
}

/// Cell view with derived intersection flags, as handed to a renderer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedCell {
    pub id: GridPos,
    pub row: u8,
    pub col: u8,
    pub number: Option<u8>,
    pub is_intersection: bool,
    /// Sorted source ids; `None` unless this cell is an intersection
    pub intersection_sources: Option<Vec<GridPos>>,
    /// Numbers on those sources, ascending
    pub source_numbers: Option<Vec<u8>>,
}

/// Validate a number coming from outside (0 clears, 1-12 assigns)
pub fn checked_number(value: i64) -> Result<u8, GridError> {
    u8::try_from(value)
        .ok()
        .filter(|n| *n <= MAX_NUMBER)
        .ok_or(GridError::NumberOutOfRange(value))
}

/// The authoritative cell collection
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    /// One cell per valid position, row-major
    cells: Vec<Cell>,
}

impl Board {
    /// Empty board: every cell present, no numbers
    pub fn new() -> Self {
        let cells = all_positions()
            .map(|pos| Cell { pos, number: None })
            .collect();
        Self { cells }
    }

    /// Board with `count` random numbers from a fixed seed
    pub fn seeded(seed: u64, count: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::random(&mut rng, count)
    }

    /// Scatter `count` random numbers (1-12) over distinct cells
    pub fn random<R: Rng>(rng: &mut R, count: usize) -> Self {
        let mut board = Self::new();
        let mut positions: Vec<GridPos> = all_positions().collect();
        positions.shuffle(rng);

        for pos in positions.into_iter().take(count.min(TOTAL_CELLS)) {
            let number = rng.gen_range(1..=MAX_NUMBER);
            if let Some(cell) = board.cell_mut(pos) {
                cell.number = Some(number);
            }
        }
        board
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, pos: GridPos) -> Option<&Cell> {
        pos.index().and_then(|i| self.cells.get(i))
    }

    fn cell_mut(&mut self, pos: GridPos) -> Option<&mut Cell> {
        pos.index().and_then(move |i| self.cells.get_mut(i))
    }

    fn require_mut(&mut self, pos: GridPos) -> Result<&mut Cell, GridError> {
        self.cell_mut(pos).ok_or(GridError::OutOfBounds {
            row: pos.row,
            col: pos.col,
        })
    }

    pub fn number_at(&self, pos: GridPos) -> Option<u8> {
        self.cell(pos).and_then(|c| c.number)
    }

    /// Numbered cells, row-major
    pub fn numbered(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().filter(|c| c.number.is_some())
    }

    /// Set the number at `pos`. Zero clears the cell.
    pub fn set_number(&mut self, pos: GridPos, number: u8) -> Result<(), GridError> {
        if number > MAX_NUMBER {
            return Err(GridError::NumberOutOfRange(i64::from(number)));
        }
        let cell = self.require_mut(pos)?;
        cell.number = (number != 0).then_some(number);
        Ok(())
    }

    pub fn clear_number(&mut self, pos: GridPos) -> Result<(), GridError> {
        self.require_mut(pos)?.number = None;
        Ok(())
    }

    /// Move the number at `from` onto `to`, overwriting whatever is there.
    ///
    /// Returns `false` without touching the board when `from == to` or
    /// `from` holds no number.
    pub fn move_number(&mut self, from: GridPos, to: GridPos) -> Result<bool, GridError> {
        // Validate both ends before mutating anything
        self.require_mut(to)?;
        let source = self.require_mut(from)?;

        if from == to {
            return Ok(false);
        }
        let Some(number) = source.number.take() else {
            return Ok(false);
        };
        self.require_mut(to)?.number = Some(number);
        Ok(true)
    }

    /// Clear every number
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.number = None;
        }
    }

    pub fn coverage(&self) -> CoverageMap {
        CoverageMap::compute(self.cells.iter().map(|c| (c.pos, c.number)))
    }

    /// Every cell with its intersection flags merged in
    pub fn annotated(&self, threshold: Threshold) -> Vec<AnnotatedCell> {
        let intersections = self.coverage().intersections(threshold);

        self.cells
            .iter()
            .map(|cell| {
                let sources = intersections
                    .get(&cell.pos)
                    .map(|s| s.iter().copied().collect::<Vec<_>>());
                let source_numbers = sources.as_ref().map(|s| {
                    let mut numbers: Vec<u8> =
                        s.iter().filter_map(|p| self.number_at(*p)).collect();
                    numbers.sort_unstable();
                    numbers
                });
                AnnotatedCell {
                    id: cell.pos,
                    row: cell.pos.row,
                    col: cell.pos.col,
                    number: cell.number,
                    is_intersection: sources.is_some(),
                    intersection_sources: sources,
                    source_numbers,
                }
            })
            .collect()
    }

    /// Persisted form: `(id, number)` for every cell
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.cells
                .iter()
                .map(|c| SavedCell {
                    id: c.pos.id(),
                    number: c.number,
                })
                .collect(),
        )
    }

    /// Rebuild from a snapshot, skipping entries that do not fit the grid.
    ///
    /// Cells missing from the snapshot stay empty.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let mut board = Self::new();

        for saved in &snapshot.cells {
            let pos = match saved.id.parse::<GridPos>() {
                Ok(pos) => pos,
                Err(e) => {
                    tracing::warn!("Skipping saved cell: {}", e);
                    continue;
                }
            };
            let number = saved.number.unwrap_or(0);
            if let Err(e) = board.set_number(pos, number) {
                tracing::warn!("Skipping saved cell {}: {}", pos, e);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
