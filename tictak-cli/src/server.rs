//! Server command - start the HTTP server for the browser board
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: configure_server(), start_server()
//! - Level 3: load_game_defaults(), validate_static_dir()
//! - Level 4: (delegated to tictak-server crate)

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use tictak_core::{Difficulty, GameConfig, GameMode};
use tictak_server::{run_server, ServerConfig};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ServerArgs {
    /// Port number to listen on
    #[arg(long, default_value = "8003")]
    pub port: u16,

    /// Directory containing the browser UI
    #[arg(long, default_value = "web")]
    pub static_dir: PathBuf,

    /// JSON file with game defaults (mode, difficulty, names, timing)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Default mode for new games (pvp or pvai)
    #[arg(long)]
    pub mode: Option<GameMode>,

    /// Default computer difficulty (easy or hard)
    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    /// Default seconds per move
    #[arg(long)]
    pub seconds_per_move: Option<u32>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run server command
///
/// This function reads like a table of contents:
/// 1. Configure server
/// 2. Start server (blocking)
pub fn run(args: ServerArgs, seed: Option<u64>) -> Result<()> {
    let config = configure_server(&args, seed)?;

    tracing::info!(
        "Starting TICTAK server on port {} ({:?}, {}, {}s per move)",
        config.port,
        config.game.mode,
        config.game.difficulty,
        config.game.seconds_per_move
    );

    start_server(config)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Configure server from command arguments
fn configure_server(args: &ServerArgs, seed: Option<u64>) -> Result<ServerConfig> {
    validate_static_dir(&args.static_dir)?;

    Ok(ServerConfig {
        port: args.port,
        static_dir: args.static_dir.to_string_lossy().to_string(),
        game: load_game_defaults(args)?,
        seed,
    })
}

/// Start the server (blocking)
fn start_server(config: ServerConfig) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;

    runtime.block_on(async { run_server(config).await })
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Config file first, then command-line overrides
fn load_game_defaults(args: &ServerArgs) -> Result<GameConfig> {
    let mut game = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    if let Some(mode) = args.mode {
        game.mode = mode;
    }
    if let Some(difficulty) = args.difficulty {
        game.difficulty = difficulty;
    }
    if let Some(seconds) = args.seconds_per_move {
        game.seconds_per_move = seconds;
    }

    Ok(game.normalized())
}

/// Validate that static directory exists
fn validate_static_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        tracing::warn!(
            "Static directory does not exist: {}. Server will start but only the API is available.",
            path.display()
        );
    } else if !path.is_dir() {
        anyhow::bail!(
            "Static path exists but is not a directory: {}",
            path.display()
        );
    }

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
