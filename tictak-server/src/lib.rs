//! TICTAK Server - HTTP API for the browser board
//!
//! This crate provides the web backend:
//! - REST API for starting, playing and restarting a session
//! - Per-move clock and delayed computer replies on a single-slot scheduler
//! - Static file serving for the browser UI

mod clock;
mod routes;
mod scheduler;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tictak_core::GameConfig;
use tower_http::services::ServeDir;

pub use scheduler::Scheduler;
pub use state::{Deferred, ServerState, Table};

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: String,
    /// Defaults for fields a start request leaves out
    pub game: GameConfig,
    /// Fixed seed for the computer's RNG (None = entropy)
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8003,
            static_dir: "web".to_string(),
            game: GameConfig::default(),
            seed: None,
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &ServerConfig, state: Arc<ServerState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Board geometry
        .route("/api/board", get(routes::board::get_board))
        // Game API
        .route("/api/game/start", post(routes::game::start_game))
        .route("/api/game/state", get(routes::game::get_game_state))
        .route("/api/game/move", post(routes::game::make_move))
        .route("/api/game/restart", post(routes::game::restart_game))
        .route("/api/game/decision", get(routes::game::get_decision))
        // Shared state
        .with_state(state)
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Start the HTTP server
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(ServerState::with_defaults(config.game.clone(), config.seed));
    let router = create_router(&config, state);

    tracing::info!("TICTAK Server starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Static files served from: {}", config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
