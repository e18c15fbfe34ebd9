//! Board commands: set, clear, move, reset

use super::ApiError;
use crate::state::ServerState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use hextri_core::{checked_number, GridPos};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Result of a board command
#[derive(Serialize)]
pub struct CommandResponse {
    pub success: bool,
    pub changed: bool,
    pub version: u64,
}

impl CommandResponse {
    fn new((changed, version): (bool, u64)) -> Json<Self> {
        Json(Self {
            success: true,
            changed,
            version,
        })
    }
}

fn parse_id(id: &str) -> Result<GridPos, ApiError> {
    Ok(id.parse::<GridPos>()?)
}

/// Set request; `null` or 0 clears the cell
#[derive(Deserialize)]
pub struct SetRequest {
    pub number: Option<i64>,
}

/// Set the number on one cell
pub async fn set_cell(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    payload: Result<Json<SetRequest>, JsonRejection>,
) -> Result<Json<CommandResponse>, ApiError> {
    let Json(req) = payload?;
    let pos = parse_id(&id)?;
    let number = checked_number(req.number.unwrap_or(0))?;

    let result = state
        .mutate(|board| {
            let before = board.number_at(pos);
            board.set_number(pos, number)?;
            Ok(board.number_at(pos) != before)
        })
        .await?;

    tracing::info!("Set {} to {:?}", pos, req.number);
    Ok(CommandResponse::new(result))
}

/// Clear the number on one cell
pub async fn clear_cell(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Json<CommandResponse>, ApiError> {
    let pos = parse_id(&id)?;

    let result = state
        .mutate(|board| {
            let had_number = board.number_at(pos).is_some();
            board.clear_number(pos)?;
            Ok(had_number)
        })
        .await?;

    tracing::info!("Cleared {}", pos);
    Ok(CommandResponse::new(result))
}

/// Move request
#[derive(Deserialize)]
pub struct MoveRequest {
    pub from: String,
    pub to: String,
}

/// Move a number from one cell to another
pub async fn move_number(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> Result<Json<CommandResponse>, ApiError> {
    let Json(req) = payload?;
    let from = parse_id(&req.from)?;
    let to = parse_id(&req.to)?;

    let result = state.mutate(|board| board.move_number(from, to)).await?;

    tracing::info!("Move {} -> {} (changed: {})", from, to, result.0);
    Ok(CommandResponse::new(result))
}

/// Clear every number on the board
pub async fn reset_board(
    State(state): State<Arc<ServerState>>,
) -> Result<Json<CommandResponse>, ApiError> {
    let result = state
        .mutate(|board| {
            let had_numbers = board.numbered().next().is_some();
            board.reset();
            Ok(had_numbers)
        })
        .await?;

    tracing::info!("Board reset");
    Ok(CommandResponse::new(result))
}
