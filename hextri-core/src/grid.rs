//! Hex grid geometry with offset positions and cube coordinates
//!
//! The grid is a hex-packed rectangle of pointy-top cells. Odd rows are
//! shoved right by half a cell ("odd-r" layout), so even rows hold one more
//! cell than odd rows.

use crate::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of rows in the grid
pub const ROWS: u8 = 7;

/// Columns in even rows (0, 2, 4, 6)
pub const EVEN_ROW_COLS: u8 = 8;

/// Columns in odd rows (1, 3, 5)
pub const ODD_ROW_COLS: u8 = 7;

/// Total number of cells: 4 * 8 + 3 * 7
pub const TOTAL_CELLS: usize = 53;

const ID_PREFIX: &str = "hex-r";
const ID_COL_SEPARATOR: &str = "-c";

/// Number of columns for a given row
pub const fn cols_for_row(row: u8) -> u8 {
    if row % 2 == 0 {
        EVEN_ROW_COLS
    } else {
        ODD_ROW_COLS
    }
}

/// Offset grid position (row, column)
///
/// Ordering is row-major, which is also the canonical order of every
/// collection of positions this crate returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GridPos {
    pub row: u8,
    pub col: u8,
}

impl GridPos {
    /// Build a position without bounds checking
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Build a position, rejecting anything outside the grid
    pub fn checked(row: u8, col: u8) -> Result<Self, GridError> {
        let pos = Self::new(row, col);
        if pos.is_valid() {
            Ok(pos)
        } else {
            Err(GridError::OutOfBounds { row, col })
        }
    }

    /// Check if this position is on the grid
    pub fn is_valid(&self) -> bool {
        self.row < ROWS && self.col < cols_for_row(self.row)
    }

    /// Odd-r offset to cube transform
    pub fn to_cube(&self) -> Cube {
        let row = i16::from(self.row);
        let col = i16::from(self.col);
        let x = col - (row - (row & 1)) / 2;
        let z = row;
        Cube::new(x, -x - z, z)
    }

    /// Inverse of [`GridPos::to_cube`]. Returns `None` off the grid.
    pub fn from_cube(cube: Cube) -> Option<Self> {
        let row = cube.z;
        let col = cube.x + (cube.z - (cube.z & 1)) / 2;
        let row = u8::try_from(row).ok()?;
        let col = u8::try_from(col).ok()?;
        Self::checked(row, col).ok()
    }

    /// Hex distance between two positions
    pub fn distance_to(&self, other: GridPos) -> u16 {
        self.to_cube().distance_to(other.to_cube())
    }

    /// Valid edge-adjacent positions, in direction order
    pub fn neighbors(&self) -> Vec<GridPos> {
        let cube = self.to_cube();
        (0..6)
            .filter_map(|dir| GridPos::from_cube(cube.neighbor(dir)))
            .collect()
    }

    /// Row-major index into a full cell collection
    pub fn index(&self) -> Option<usize> {
        if !self.is_valid() {
            return None;
        }
        let row = usize::from(self.row);
        let evens_before = (row + 1) / 2;
        let odds_before = row / 2;
        Some(
            evens_before * usize::from(EVEN_ROW_COLS)
                + odds_before * usize::from(ODD_ROW_COLS)
                + usize::from(self.col),
        )
    }

    /// Stable string identifier, `hex-r{row}-c{col}`
    pub fn id(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", ID_PREFIX, self.row, ID_COL_SEPARATOR, self.col)
    }
}

impl FromStr for GridPos {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GridError::InvalidId(s.to_string());

        let rest = s.strip_prefix(ID_PREFIX).ok_or_else(invalid)?;
        let (row, col) = rest.split_once(ID_COL_SEPARATOR).ok_or_else(invalid)?;
        let row = parse_digits(row).ok_or_else(invalid)?;
        let col = parse_digits(col).ok_or_else(invalid)?;

        GridPos::checked(row, col)
    }
}

/// Parse a non-empty run of ASCII digits (no sign, no whitespace)
fn parse_digits(s: &str) -> Option<u8> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl TryFrom<String> for GridPos {
    type Error = GridError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GridPos> for String {
    fn from(pos: GridPos) -> Self {
        pos.to_string()
    }
}

/// Cube coordinates (invariant: x + y + z == 0)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cube {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Cube {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Distance between two cubes: max of absolute coordinate differences
    pub fn distance_to(&self, other: Cube) -> u16 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        let dz = (self.z - other.z).unsigned_abs();
        dx.max(dy).max(dz)
    }

    /// Get neighbor in direction (0-5)
    pub fn neighbor(&self, direction: u8) -> Cube {
        let (dx, dy, dz) = DIRECTIONS[direction as usize % 6];
        Cube::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

/// Direction vectors in cube coordinates (dx, dy, dz)
/// Index: 0=E, 1=NE, 2=NW, 3=W, 4=SW, 5=SE
pub const DIRECTIONS: [(i16, i16, i16); 6] = [
    (1, -1, 0),  // E
    (1, 0, -1),  // NE
    (0, 1, -1),  // NW
    (-1, 1, 0),  // W
    (-1, 0, 1),  // SW
    (0, -1, 1),  // SE
];

/// All valid grid positions in row-major order
pub fn all_positions() -> impl Iterator<Item = GridPos> {
    (0..ROWS).flat_map(|row| (0..cols_for_row(row)).map(move |col| GridPos::new(row, col)))
}

/// Hex distance between two positions
pub fn distance(a: GridPos, b: GridPos) -> u16 {
    a.distance_to(b)
}

/// All valid positions exactly `d` steps from `center`, row-major
///
/// `center` itself need not be valid; it is only ever returned for `d == 0`
/// when it is on the grid.
pub fn cells_at_distance(center: GridPos, d: u16) -> Vec<GridPos> {
    let origin = center.to_cube();
    all_positions()
        .filter(|pos| origin.distance_to(pos.to_cube()) == d)
        .collect()
}
