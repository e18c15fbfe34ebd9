//! Error types for grid and board operations

/// Errors raised when building positions or mutating the board
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("Invalid hex id: {0}")]
    InvalidId(String),

    #[error("Position out of bounds: row {row}, col {col}")]
    OutOfBounds { row: u8, col: u8 },

    #[error("Number out of range (expected 0-12): {0}")]
    NumberOutOfRange(i64),
}
