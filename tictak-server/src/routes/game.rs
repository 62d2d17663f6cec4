//! Game API endpoints
//!
//! Start, inspect, move and restart the live session. Invalid moves are not
//! errors at the HTTP level: the response says the move was not accepted and
//! the session is left as it was.

use crate::clock;
use crate::state::{ServerState, Table};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use tictak_core::{Difficulty, GameConfig, GameMode, GameStatus, Mark};

#[derive(Serialize)]
pub struct PlayerView {
    pub name: String,
    pub mark: Mark,
    pub score: u32,
}

/// Everything a renderer needs to draw the current game
#[derive(Serialize)]
pub struct GameView {
    pub active: bool,
    pub grid: Vec<&'static str>,
    pub status: &'static str,
    pub turn: Mark,
    pub winner: Option<Mark>,
    pub winning_line: Option<[usize; 3]>,
    pub players: Vec<PlayerView>,
    pub draws: u32,
    pub time_left: u32,
    pub seconds_per_move: u32,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub message: String,
}

impl GameView {
    pub fn from_table(table: &Table) -> Self {
        let session = &table.session;
        let (status, winner) = match session.status() {
            GameStatus::AwaitingMove(_) => ("playing", None),
            GameStatus::Won(mark) => ("won", Some(mark)),
            GameStatus::Drawn => ("drawn", None),
        };

        Self {
            active: true,
            grid: session.grid().cells().iter().map(|c| c.symbol()).collect(),
            status,
            turn: session.active_mark(),
            winner,
            winning_line: session.winning_line(),
            players: session
                .players()
                .iter()
                .map(|p| PlayerView {
                    name: p.name().to_string(),
                    mark: p.mark(),
                    score: p.score(),
                })
                .collect(),
            draws: session.draws(),
            time_left: table.timer.time_left(),
            seconds_per_move: table.timer.seconds_per_move(),
            mode: session.mode(),
            difficulty: session.difficulty(),
            message: table.message.clone(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StartRequest {
    pub mode: Option<GameMode>,
    pub difficulty: Option<Difficulty>,
    pub player1: Option<String>,
    pub player2: Option<String>,
    pub seconds_per_move: Option<u32>,
}

impl StartRequest {
    /// Overlay the request on the server defaults
    fn into_config(self, defaults: &GameConfig) -> GameConfig {
        let mut config = defaults.clone();
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(difficulty) = self.difficulty {
            config.difficulty = difficulty;
        }
        if let Some(name) = self.player1 {
            config.player1 = name;
        }
        if let Some(name) = self.player2 {
            config.player2 = name;
        }
        if let Some(seconds) = self.seconds_per_move {
            config.seconds_per_move = seconds;
        }
        config.normalized()
    }
}

/// Start a new session, replacing any previous one (scores start at zero)
pub async fn start_game(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<StartRequest>,
) -> Json<GameView> {
    let config = req.into_config(&state.defaults);
    tracing::info!(
        "Starting game: {} vs {} ({:?}, {}, {}s per move)",
        config.player1,
        config.player2,
        config.mode,
        config.difficulty,
        config.seconds_per_move
    );

    let mut guard = state.table();
    let table = guard.insert(Table::new(config, state.seed));
    let next = table.begin();
    let view = GameView::from_table(table);
    clock::arm(&state, next);

    Json(view)
}

/// Get current game state
pub async fn get_game_state(State(state): State<Arc<ServerState>>) -> Json<Value> {
    match state.table().as_ref() {
        Some(table) => Json(json!(GameView::from_table(table))),
        None => Json(json!({ "active": false })),
    }
}

#[derive(Deserialize)]
pub struct MoveRequest {
    pub index: usize,
}

#[derive(Serialize)]
pub struct MoveResponse {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<GameView>,
}

/// Apply a human move for the side to move
pub async fn make_move(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<MoveRequest>,
) -> Json<MoveResponse> {
    let mut guard = state.table();
    let Some(table) = guard.as_mut() else {
        return Json(MoveResponse {
            accepted: false,
            error: Some("No game in progress".to_string()),
            game: None,
        });
    };

    match table.submit_move(req.index) {
        Ok((_, next)) => {
            clock::arm(&state, next);
            Json(MoveResponse {
                accepted: true,
                error: None,
                game: Some(GameView::from_table(table)),
            })
        }
        Err(e) => {
            tracing::debug!("Move {} ignored: {}", req.index, e);
            Json(MoveResponse {
                accepted: false,
                error: Some(e.to_string()),
                game: Some(GameView::from_table(table)),
            })
        }
    }
}

/// Clear the board and start again with X; scores are kept
pub async fn restart_game(State(state): State<Arc<ServerState>>) -> Json<Value> {
    let mut guard = state.table();
    let Some(table) = guard.as_mut() else {
        return Json(json!({ "error": "No game in progress" }));
    };

    let next = table.restart();
    clock::arm(&state, next);
    tracing::info!("Game restarted");

    Json(json!(GameView::from_table(table)))
}

#[derive(Debug, Default, Deserialize)]
pub struct DecisionQuery {
    pub difficulty: Option<Difficulty>,
}

/// What the computer would play for the side to move (the board is not changed)
pub async fn get_decision(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<DecisionQuery>,
) -> Json<Value> {
    let guard = state.table();
    let Some(table) = guard.as_ref() else {
        return Json(json!({ "error": "No game in progress" }));
    };

    let difficulty = query.difficulty.unwrap_or(table.session.difficulty());
    match table.decision(difficulty) {
        Ok(index) => Json(json!({ "index": index, "difficulty": difficulty })),
        Err(e) => {
            tracing::warn!("Decision requested on a finished board: {}", e);
            Json(json!({ "error": e.to_string() }))
        }
    }
}
