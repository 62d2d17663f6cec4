//! TICTAK Core - Game engine and computer opponent
//!
//! This crate provides the core game logic for TICTAK:
//! - Board geometry (3x3 grid, winning lines)
//! - Game session, move validation and turn protocol
//! - Computer opponent (random and full-depth minimax)
//! - Per-move countdown state
//! - Session configuration

pub mod board;
pub mod game;
pub mod ai;
pub mod timer;
pub mod config;

// Re-exports for convenient access
pub use board::{Cell, Grid, Mark, CELL_COUNT, WINNING_LINES};
pub use game::{GameError, GameSession, GameStatus, MoveOutcome, Player, TimeoutAction};
pub use ai::{best_move, minimax, random_move, ComputerPlayer, Scored, WIN_SCORE};
pub use timer::{Tick, TimerToken, TurnTimer};
pub use config::{Difficulty, GameConfig, GameMode};
