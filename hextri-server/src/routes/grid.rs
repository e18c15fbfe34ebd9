//! Grid geometry endpoint

use axum::Json;
use hextri_core::{all_positions, cols_for_row, GridPos, ROWS, TOTAL_CELLS};
use serde::Serialize;

#[derive(Serialize)]
pub struct GridInfo {
    pub rows: u8,
    pub cols_per_row: Vec<u8>,
    pub total: usize,
    pub ids: Vec<GridPos>,
}

/// Get grid geometry
pub async fn get_grid() -> Json<GridInfo> {
    Json(GridInfo {
        rows: ROWS,
        cols_per_row: (0..ROWS).map(cols_for_row).collect(),
        total: TOTAL_CELLS,
        ids: all_positions().collect(),
    })
}
