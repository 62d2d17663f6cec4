//! Board geometry endpoint

use axum::Json;
use serde::Serialize;
use tictak_core::board::{BOARD_SIZE, CELL_COUNT, WINNING_LINES};

#[derive(Serialize)]
pub struct BoardInfo {
    pub size: usize,
    pub cells: usize,
    pub winning_lines: Vec<[usize; 3]>,
}

/// Get board geometry
pub async fn get_board() -> Json<BoardInfo> {
    Json(BoardInfo {
        size: BOARD_SIZE,
        cells: CELL_COUNT,
        winning_lines: WINNING_LINES.to_vec(),
    })
}
