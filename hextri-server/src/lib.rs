//! HEXTRI Server - HTTP API for the grid UI
//!
//! This crate provides the web backend:
//! - REST API for board commands (set, clear, move, reset)
//! - Board and coverage queries with intersection flags
//! - Long-poll for board changes
//! - Static file serving for the UI

mod routes;
mod state;

use axum::{
    routing::{get, post, put},
    Router,
};
use hextri_core::{FileStore, Threshold};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::services::ServeDir;

pub use state::{BoardSession, ServerState};

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
    /// Directory for the saved board; `None` keeps the board in memory only
    pub state_dir: Option<PathBuf>,
    pub threshold: Threshold,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8003,
            static_dir: "hextri/ui".to_string(),
            state_dir: None,
            threshold: Threshold::default(),
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Grid geometry
        .route("/api/grid", get(routes::grid::get_grid))
        // Board state
        .route("/api/board", get(routes::board::get_board))
        .route("/api/board/poll", get(routes::board::poll_board))
        .route("/api/coverage", get(routes::coverage::get_coverage))
        // Board commands
        .route(
            "/api/cells/:id",
            put(routes::cells::set_cell).delete(routes::cells::clear_cell),
        )
        .route("/api/move", post(routes::cells::move_number))
        .route("/api/reset", post(routes::cells::reset_board))
        // Shared state
        .with_state(state)
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Build shared state from the configuration
pub fn create_state(config: &ServerConfig) -> anyhow::Result<Arc<ServerState>> {
    let state = match &config.state_dir {
        Some(dir) => ServerState::with_store(config.threshold, FileStore::open(dir)?)?,
        None => ServerState::with_threshold(config.threshold),
    };
    Ok(Arc::new(state))
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = create_state(&config)?;
    let router = create_router(&config, state);

    tracing::info!("HEXTRI Server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Static files served from: {}", config.static_dir);
    match &config.state_dir {
        Some(dir) => tracing::info!("Board saved to: {}", dir.display()),
        None => tracing::info!("Board kept in memory only"),
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
