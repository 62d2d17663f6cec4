//! Game-tree checks for the minimax opponent.
//!
//! Perfect play in tic-tac-toe means:
//! - Never losing against any sequence of human moves
//! - Winning when the human makes a mistake
//! - Drawing against another perfect player

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tictak_core::{
    best_move, Difficulty, GameConfig, GameSession, GameStatus, Mark, TimeoutAction,
};

#[derive(Debug, Default)]
struct Tally {
    computer_wins: usize,
    human_wins: usize,
    draws: usize,
}

fn hard_session() -> GameSession {
    GameSession::new(&GameConfig::vs_computer(Difficulty::Hard))
}

/// Record the result if the game is over
fn settle(session: &GameSession, tally: &mut Tally) -> bool {
    match session.status() {
        GameStatus::Won(Mark::O) => tally.computer_wins += 1,
        GameStatus::Won(Mark::X) => tally.human_wins += 1,
        GameStatus::Drawn => tally.draws += 1,
        GameStatus::AwaitingMove(_) => return false,
    }
    true
}

/// Try every human move, let the computer answer, and recurse
fn explore(session: &GameSession, rng: &mut ChaCha8Rng, tally: &mut Tally) {
    assert_eq!(session.active_mark(), Mark::X);
    let empty: Vec<usize> = session.grid().empty_cells().collect();

    for index in empty {
        let mut branch = session.clone();
        branch.apply_move(index, Mark::X).unwrap();
        if settle(&branch, tally) {
            continue;
        }

        let reply = branch.decide(Difficulty::Hard, rng).unwrap();
        branch.apply_move(reply, Mark::O).unwrap();
        if settle(&branch, tally) {
            continue;
        }

        explore(&branch, rng, tally);
    }
}

#[test]
fn test_minimax_never_loses_to_any_human_line() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut tally = Tally::default();

    explore(&hard_session(), &mut rng, &mut tally);

    assert_eq!(tally.human_wins, 0, "{:?}", tally);
    assert!(tally.draws > 0, "{:?}", tally);
    assert!(tally.computer_wins > 0, "mistakes should be punished: {:?}", tally);
}

#[test]
fn test_minimax_never_loses_after_human_timeout() {
    // The human lets the clock run out on the first turn, so the computer opens
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut tally = Tally::default();

    let mut session = hard_session();
    assert_eq!(session.handle_timeout(), TimeoutAction::TurnPassed(Mark::O));
    let opening = session.decide(Difficulty::Hard, &mut rng).unwrap();
    session.apply_move(opening, Mark::O).unwrap();

    explore(&session, &mut rng, &mut tally);

    assert_eq!(tally.human_wins, 0, "{:?}", tally);
}

#[test]
fn test_perfect_players_draw() {
    let mut session = hard_session();

    while !session.is_over() {
        let mark = session.active_mark();
        let index = best_move(session.grid(), mark).unwrap();
        session.apply_move(index, mark).unwrap();
    }

    assert_eq!(session.status(), GameStatus::Drawn);
    assert_eq!(session.draws(), 1);
}

#[test]
fn test_minimax_beats_random_or_draws() {
    for seed in 0..20 {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut session = hard_session();

        while !session.is_over() {
            let difficulty = if session.active_mark() == Mark::X {
                Difficulty::Easy
            } else {
                Difficulty::Hard
            };
            let index = session.decide(difficulty, &mut rng).unwrap();
            session.apply_move(index, session.active_mark()).unwrap();
        }

        assert_ne!(
            session.status(),
            GameStatus::Won(Mark::X),
            "random X beat minimax with seed {}:\n{}",
            seed,
            session.grid()
        );
    }
}
