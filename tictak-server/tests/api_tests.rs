//! Integration tests for tictak-server API

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tictak_server::{create_router, ServerConfig, ServerState};
use tower::ServiceExt;

fn test_app() -> axum::Router {
    let config = ServerConfig::default();
    let state = Arc::new(ServerState::with_defaults(config.game.clone(), Some(7)));
    create_router(&config, state)
}

async fn get(app: &axum::Router, uri: &str) -> Value {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn post(app: &axum::Router, uri: &str, body: Value) -> Value {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn start_pvp(app: &axum::Router, seconds: u32) -> Value {
    post(
        app,
        "/api/game/start",
        json!({
            "mode": "human_vs_human",
            "player1": "Alice",
            "player2": "Bob",
            "seconds_per_move": seconds
        }),
    )
    .await
}

async fn play(app: &axum::Router, index: usize) -> Value {
    post(app, "/api/game/move", json!({ "index": index })).await
}

fn marks(game: &Value, symbol: &str) -> usize {
    game["grid"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|cell| *cell == symbol)
        .count()
}

#[tokio::test]
async fn test_status_endpoint() {
    let app = test_app();
    let json = get(&app, "/api/status").await;

    assert_eq!(json["status"], "ok");
    assert_eq!(json["engine"], "minimax");
}

#[tokio::test]
async fn test_board_endpoint() {
    let app = test_app();
    let json = get(&app, "/api/board").await;

    assert_eq!(json["size"], 3);
    assert_eq!(json["cells"], 9);
    let lines = json["winning_lines"].as_array().unwrap();
    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0], json!([0, 1, 2]));
    assert_eq!(lines[7], json!([2, 4, 6]));
}

#[tokio::test]
async fn test_state_before_start() {
    let app = test_app();
    let json = get(&app, "/api/game/state").await;
    assert_eq!(json["active"], false);

    let json = play(&app, 4).await;
    assert_eq!(json["accepted"], false);
    assert_eq!(json["error"], "No game in progress");
}

#[tokio::test]
async fn test_start_game() {
    let app = test_app();
    let game = start_pvp(&app, 10).await;

    assert_eq!(game["active"], true);
    assert_eq!(game["status"], "playing");
    assert_eq!(game["turn"], "X");
    assert_eq!(game["message"], "Alice (X)'s turn");
    assert_eq!(game["time_left"], 10);
    assert_eq!(game["grid"], json!(["", "", "", "", "", "", "", "", ""]));
    assert_eq!(game["players"][1]["name"], "Bob");
    assert_eq!(game["players"][1]["mark"], "O");
}

#[tokio::test]
async fn test_computer_gets_its_name() {
    let app = test_app();
    let game = post(
        &app,
        "/api/game/start",
        json!({ "mode": "pvai", "difficulty": "hard", "player1": "", "player2": "Bob" }),
    )
    .await;

    assert_eq!(game["players"][0]["name"], "Player 1");
    assert_eq!(game["players"][1]["name"], "Computer");
    assert_eq!(game["mode"], "human_vs_computer");
    assert_eq!(game["difficulty"], "hard");
}

#[tokio::test]
async fn test_moves_alternate_and_occupied_cell_is_ignored() {
    let app = test_app();
    start_pvp(&app, 10).await;

    let json = play(&app, 4).await;
    assert_eq!(json["accepted"], true);
    assert_eq!(json["game"]["grid"][4], "X");
    assert_eq!(json["game"]["turn"], "O");

    let json = play(&app, 4).await;
    assert_eq!(json["accepted"], false);
    assert_eq!(json["error"], "Cell 4 is already occupied");
    assert_eq!(json["game"]["turn"], "O");
    assert_eq!(marks(&json["game"], "O"), 0);

    let json = play(&app, 12).await;
    assert_eq!(json["accepted"], false);
    assert_eq!(json["error"], "Cell index 12 is off the board");
}

#[tokio::test]
async fn test_win_then_restart_keeps_score() {
    let app = test_app();
    start_pvp(&app, 10).await;

    for index in [0, 3, 1, 4] {
        assert_eq!(play(&app, index).await["accepted"], true);
    }
    let json = play(&app, 2).await;
    let game = &json["game"];
    assert_eq!(game["status"], "won");
    assert_eq!(game["winner"], "X");
    assert_eq!(game["winning_line"], json!([0, 1, 2]));
    assert_eq!(game["message"], "Alice wins!");
    assert_eq!(game["players"][0]["score"], 1);

    let json = play(&app, 8).await;
    assert_eq!(json["accepted"], false);
    assert_eq!(json["error"], "Game is already over");

    let game = post(&app, "/api/game/restart", json!({})).await;
    assert_eq!(game["status"], "playing");
    assert_eq!(game["turn"], "X");
    assert_eq!(marks(&game, ""), 9);
    assert_eq!(game["players"][0]["score"], 1);
    assert_eq!(game["draws"], 0);
}

#[tokio::test]
async fn test_draw_is_counted() {
    let app = test_app();
    start_pvp(&app, 10).await;

    let mut last = Value::Null;
    for index in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
        last = play(&app, index).await;
        assert_eq!(last["accepted"], true);
    }
    assert_eq!(last["game"]["status"], "drawn");
    assert_eq!(last["game"]["message"], "It's a draw!");
    assert_eq!(last["game"]["draws"], 1);
    assert_eq!(last["game"]["winning_line"], Value::Null);
}

#[tokio::test]
async fn test_decision_does_not_touch_board() {
    let app = test_app();
    post(&app, "/api/game/start", json!({ "mode": "pvai", "difficulty": "hard" })).await;

    let json = get(&app, "/api/game/decision?difficulty=hard").await;
    assert_eq!(json["index"], 0);
    assert_eq!(json["difficulty"], "hard");

    let game = get(&app, "/api/game/state").await;
    assert_eq!(marks(&game, ""), 9);
    assert_eq!(game["turn"], "X");
}

#[tokio::test(start_paused = true)]
async fn test_computer_replies_after_delay() {
    let app = test_app();
    post(&app, "/api/game/start", json!({ "mode": "pvai", "difficulty": "hard" })).await;

    let json = play(&app, 4).await;
    assert_eq!(json["accepted"], true);
    assert_eq!(json["game"]["turn"], "O");

    // Clicks during the computer's turn are ignored
    let json = play(&app, 0).await;
    assert_eq!(json["accepted"], false);

    tokio::time::sleep(Duration::from_millis(600)).await;

    let game = get(&app, "/api/game/state").await;
    assert_eq!(game["turn"], "X");
    assert_eq!(marks(&game, "O"), 1);
    assert_eq!(marks(&game, "X"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_human_timeout_passes_turn() {
    let app = test_app();
    start_pvp(&app, 3).await;

    tokio::time::sleep(Duration::from_millis(3500)).await;

    let game = get(&app, "/api/game/state").await;
    assert_eq!(game["turn"], "O");
    assert_eq!(game["message"], "Time up! Bob (O)'s turn");
    assert_eq!(marks(&game, ""), 9);
    assert_eq!(game["players"][0]["score"], 0);
    assert_eq!(game["players"][1]["score"], 0);
}

#[tokio::test(start_paused = true)]
async fn test_human_timeout_leaves_computer_its_own_clock() {
    let app = test_app();
    post(
        &app,
        "/api/game/start",
        json!({ "mode": "pvai", "difficulty": "hard", "seconds_per_move": 3 }),
    )
    .await;

    tokio::time::sleep(Duration::from_millis(3700)).await;
    let game = get(&app, "/api/game/state").await;
    assert_eq!(game["turn"], "O");
    assert_eq!(game["message"], "Time up! Computer (O)'s turn");
    assert_eq!(marks(&game, ""), 9);

    // The computer moves when its own countdown runs out at 6s
    tokio::time::sleep(Duration::from_millis(2800)).await;
    let game = get(&app, "/api/game/state").await;
    assert_eq!(game["turn"], "X");
    assert_eq!(marks(&game, "O"), 1);
    assert_eq!(marks(&game, "X"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_move_restarts_clock() {
    let app = test_app();
    start_pvp(&app, 3).await;

    tokio::time::sleep(Duration::from_millis(2500)).await;
    assert_eq!(play(&app, 4).await["accepted"], true);

    // The first countdown would have expired at 3s; the new one runs until 5.5s
    tokio::time::sleep(Duration::from_millis(2000)).await;
    let game = get(&app, "/api/game/state").await;
    assert_eq!(game["turn"], "O");

    tokio::time::sleep(Duration::from_millis(1500)).await;
    let game = get(&app, "/api/game/state").await;
    assert_eq!(game["turn"], "X");
    assert_eq!(marks(&game, "X"), 1);
    assert_eq!(marks(&game, "O"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_clock_stops_when_game_ends() {
    let app = test_app();
    start_pvp(&app, 3).await;

    for index in [0, 3, 1, 4, 2] {
        assert_eq!(play(&app, index).await["accepted"], true);
    }

    tokio::time::sleep(Duration::from_secs(10)).await;
    let game = get(&app, "/api/game/state").await;
    assert_eq!(game["status"], "won");
    assert_eq!(game["turn"], "X");
}
