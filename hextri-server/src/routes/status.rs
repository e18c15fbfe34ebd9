//! Status endpoint

use crate::state::ServerState;
use axum::{extract::State, Json};
use hextri_core::{store::SCHEMA_VERSION, Threshold, ROWS, TOTAL_CELLS};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub schema_version: u32,
    pub rows: u8,
    pub cells: usize,
    pub threshold: Threshold,
    pub persistent: bool,
}

pub async fn status_handler(State(state): State<Arc<ServerState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        schema_version: SCHEMA_VERSION,
        rows: ROWS,
        cells: TOTAL_CELLS,
        threshold: state.threshold,
        persistent: state.is_persistent(),
    })
}
