//! Match command - computer-vs-computer games
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_match(), report_results()
//! - Level 3: play_single_game(), compute_match_statistics()
//! - Level 4: formatting utilities

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use rayon::prelude::*;

use tictak_core::{ComputerPlayer, Difficulty, GameConfig, GameSession, GameStatus, Mark};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Difficulty for X (moves first)
    #[arg(long, default_value = "easy")]
    pub x: Difficulty,

    /// Difficulty for O
    #[arg(long, default_value = "hard")]
    pub o: Difficulty,

    /// Number of games to play
    #[arg(long, default_value = "100")]
    pub games: usize,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    status: GameStatus,
    moves: Vec<usize>,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    avg_moves: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run match command
///
/// This function reads like a table of contents:
/// 1. Play the match (games in parallel)
/// 2. Report results
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!("Starting match: X {} vs O {} ({} games)", args.x, args.o, args.games);

    let base_seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
    let results = play_match(args.x, args.o, args.games, base_seed, !args.json);

    report_results(&results, &args)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play all games; game `n` seeds both sides from `base_seed + n`
fn play_match(x: Difficulty, o: Difficulty, games: usize, base_seed: u64, progress: bool) -> MatchResults {
    let bar = if progress {
        create_progress_bar(games)
    } else {
        ProgressBar::hidden()
    };

    let mut records: Vec<GameRecord> = (0..games)
        .into_par_iter()
        .map(|i| {
            let seed = base_seed.wrapping_add(i as u64);
            let record = play_single_game(x, o, i + 1, seed);
            bar.inc(1);
            record
        })
        .collect();
    bar.finish_and_clear();

    records.sort_by_key(|r| r.game_number);
    for record in &records {
        tracing::debug!("Game {}: {:?} {:?}", record.game_number, record.status, record.moves);
    }

    compute_match_statistics(records)
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    if args.json {
        print_json_results(results, args)
    } else {
        print_text_results(results, args);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Play one game to the end
fn play_single_game(x: Difficulty, o: Difficulty, game_number: usize, seed: u64) -> GameRecord {
    let mut session = GameSession::new(&GameConfig::default());
    let mut x_player = ComputerPlayer::with_seed(x, seed);
    let mut o_player = ComputerPlayer::with_seed(o, seed.rotate_left(32));
    let mut moves = Vec::with_capacity(9);

    while !session.is_over() {
        let player = match session.active_mark() {
            Mark::X => &mut x_player,
            Mark::O => &mut o_player,
        };
        match player.play_turn(&mut session) {
            Ok((index, _)) => moves.push(index),
            Err(e) => {
                tracing::warn!("Game {} stopped early: {}", game_number, e);
                break;
            }
        }
    }

    GameRecord {
        game_number,
        status: session.status(),
        moves,
    }
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let x_wins = games
        .iter()
        .filter(|g| g.status == GameStatus::Won(Mark::X))
        .count();
    let o_wins = games
        .iter()
        .filter(|g| g.status == GameStatus::Won(Mark::O))
        .count();
    let draws = games
        .iter()
        .filter(|g| g.status == GameStatus::Drawn)
        .count();

    let total_moves: usize = games.iter().map(|g| g.moves.len()).sum();
    let avg_moves = if games.is_empty() {
        0.0
    } else {
        total_moves as f32 / games.len() as f32
    };

    MatchResults {
        games,
        x_wins,
        o_wins,
        draws,
        avg_moves,
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn create_progress_bar(games: usize) -> ProgressBar {
    let bar = ProgressBar::new(games as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} games ({eta})") {
        bar.set_style(style.progress_chars("=> "));
    }
    bar
}

fn rate(count: usize, total: usize) -> f32 {
    if total > 0 {
        count as f32 / total as f32
    } else {
        0.0
    }
}

fn status_label(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Won(Mark::X) => "X wins",
        GameStatus::Won(Mark::O) => "O wins",
        GameStatus::Drawn => "draw",
        GameStatus::AwaitingMove(_) => "unfinished",
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        result: &'static str,
        moves: Vec<usize>,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        x: Difficulty,
        o: Difficulty,
        total_games: usize,
        x_wins: usize,
        o_wins: usize,
        draws: usize,
        avg_moves: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        x: args.x,
        o: args.o,
        total_games: results.games.len(),
        x_wins: results.x_wins,
        o_wins: results.o_wins,
        draws: results.draws,
        avg_moves: results.avg_moves,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                result: status_label(g.status),
                moves: g.moves.clone(),
            })
            .collect(),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print results as text
fn print_text_results(results: &MatchResults, args: &MatchArgs) {
    let total = results.games.len();

    println!("\n=== Match Results: X {} vs O {} ===", args.x, args.o);
    println!("Total games: {}", total);
    println!(
        "X wins:      {} ({:.1}%)",
        results.x_wins,
        rate(results.x_wins, total) * 100.0
    );
    println!(
        "O wins:      {} ({:.1}%)",
        results.o_wins,
        rate(results.o_wins, total) * 100.0
    );
    println!(
        "Draws:       {} ({:.1}%)",
        results.draws,
        rate(results.draws, total) * 100.0
    );
    println!("Avg moves:   {:.1}", results.avg_moves);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_match_statistics_empty() {
        let results = compute_match_statistics(vec![]);
        assert_eq!(results.x_wins, 0);
        assert_eq!(results.o_wins, 0);
        assert_eq!(results.draws, 0);
        assert_eq!(results.avg_moves, 0.0);
    }

    #[test]
    fn test_compute_match_statistics() {
        let games = vec![
            GameRecord {
                game_number: 1,
                status: GameStatus::Won(Mark::X),
                moves: vec![0, 3, 1, 4, 2],
            },
            GameRecord {
                game_number: 2,
                status: GameStatus::Drawn,
                moves: vec![0, 1, 2, 4, 3, 5, 7, 6, 8],
            },
            GameRecord {
                game_number: 3,
                status: GameStatus::Won(Mark::O),
                moves: vec![0, 4, 1, 2, 3, 6],
            },
            GameRecord {
                game_number: 4,
                status: GameStatus::Won(Mark::X),
                moves: vec![4, 0, 8, 2, 1, 6, 7],
            },
        ];

        let results = compute_match_statistics(games);
        assert_eq!(results.x_wins, 2);
        assert_eq!(results.o_wins, 1);
        assert_eq!(results.draws, 1);
        assert_eq!(results.avg_moves, 27.0 / 4.0);
    }

    #[test]
    fn test_hard_vs_hard_always_draws() {
        let results = play_match(Difficulty::Hard, Difficulty::Hard, 4, 1, false);
        assert_eq!(results.draws, 4);
        assert_eq!(results.avg_moves, 9.0);
    }

    #[test]
    fn test_easy_x_never_beats_hard_o() {
        let results = play_match(Difficulty::Easy, Difficulty::Hard, 50, 7, false);
        assert_eq!(results.x_wins, 0);
        assert_eq!(results.games.len(), 50);
        assert!(results.games.windows(2).all(|w| w[0].game_number < w[1].game_number));
    }

    #[test]
    fn test_match_is_reproducible() {
        let a = play_match(Difficulty::Easy, Difficulty::Easy, 20, 42, false);
        let b = play_match(Difficulty::Easy, Difficulty::Easy, 20, 42, false);
        let moves_a: Vec<_> = a.games.iter().map(|g| g.moves.clone()).collect();
        let moves_b: Vec<_> = b.games.iter().map(|g| g.moves.clone()).collect();
        assert_eq!(moves_a, moves_b);
        assert_eq!(a.x_wins + a.o_wins + a.draws, 20);
    }
}
