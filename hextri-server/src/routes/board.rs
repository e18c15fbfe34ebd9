//! Board state endpoints

use crate::state::{BoardSession, ServerState};
use axum::{
    extract::{Query, State},
    Json,
};
use hextri_core::{AnnotatedCell, Intersections, Threshold};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Poll attempts before giving up (50 x 100ms = 5 seconds)
const POLL_ATTEMPTS: u32 = 50;
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Board with derived intersection flags
#[derive(Serialize)]
pub struct BoardResponse {
    pub version: u64,
    pub threshold: Threshold,
    pub cells: Vec<AnnotatedCell>,
    pub intersections: Intersections,
}

impl BoardResponse {
    pub fn build(session: &BoardSession, threshold: Threshold) -> Self {
        Self {
            version: session.version,
            threshold,
            cells: session.board.annotated(threshold),
            intersections: session.board.coverage().intersections(threshold),
        }
    }
}

/// Get current board state
pub async fn get_board(State(state): State<Arc<ServerState>>) -> Json<BoardResponse> {
    let session = state.session.read().await;
    Json(BoardResponse::build(&session, state.threshold))
}

/// Poll query params
#[derive(Deserialize)]
pub struct PollParams {
    pub version: Option<u64>,
}

#[derive(Serialize)]
pub struct PollResponse {
    pub reload: bool,
    pub version: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<BoardResponse>,
}

/// Long-poll for board updates
pub async fn poll_board(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<PollParams>,
) -> Json<PollResponse> {
    let client_version = params.version.unwrap_or(0);

    for _ in 0..POLL_ATTEMPTS {
        {
            let session = state.session.read().await;
            if session.version != client_version {
                return Json(PollResponse {
                    reload: true,
                    version: session.version,
                    board: Some(BoardResponse::build(&session, state.threshold)),
                });
            }
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }

    let session = state.session.read().await;
    Json(PollResponse {
        reload: false,
        version: session.version,
        board: None,
    })
}
