//! Coverage endpoint
//!
//! Exposes the full coverage map, not just the intersections.

use super::ApiError;
use crate::state::ServerState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use hextri_core::{CoverageMap, Intersections, Threshold};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Intersection mode override
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    AtLeast,
    Exact,
}

#[derive(Deserialize)]
pub struct CoverageParams {
    pub mode: Option<Mode>,
}

#[derive(Serialize)]
pub struct CoverageResponse {
    pub version: u64,
    pub threshold: Threshold,
    pub covered: CoverageMap,
    pub intersections: Intersections,
}

/// Get the coverage map for the current board
pub async fn get_coverage(
    State(state): State<Arc<ServerState>>,
    params: Result<Query<CoverageParams>, QueryRejection>,
) -> Result<Json<CoverageResponse>, ApiError> {
    let Query(params) = params?;
    let threshold = match params.mode {
        Some(Mode::AtLeast) => Threshold::default(),
        Some(Mode::Exact) => Threshold::exact(),
        None => state.threshold,
    };

    let session = state.session.read().await;
    let covered = session.board.coverage();
    let intersections = covered.intersections(threshold);

    Ok(Json(CoverageResponse {
        version: session.version,
        threshold,
        covered,
        intersections,
    }))
}
