//! Computer opponent: random choice and exhaustive minimax

use crate::board::{Grid, Mark};
use crate::config::Difficulty;
use crate::game::{GameError, GameSession, MoveOutcome};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Score of a position the computer has won; a loss is the negation
pub const WIN_SCORE: i32 = 10;

// ============================================================================
// STRATEGIES
// ============================================================================

/// A move together with its minimax value. `index` is `None` at terminal
/// positions, where there is nothing left to choose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scored {
    pub index: Option<usize>,
    pub score: i32,
}

/// Uniformly random empty cell
pub fn random_move<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Option<usize> {
    let empty: Vec<usize> = grid.empty_cells().collect();
    empty.choose(rng).copied()
}

/// Full-depth minimax from the point of view of `me`, with `to_move` on turn.
///
/// Every branch gets its own copy of the grid, so the caller's grid is
/// never touched. Empty cells are tried in ascending order and only a
/// strictly better score replaces the current choice, so ties go to the
/// lowest index.
pub fn minimax(grid: Grid, to_move: Mark, me: Mark) -> Scored {
    if grid.is_win(me) {
        return Scored { index: None, score: WIN_SCORE };
    }
    if grid.is_win(me.opponent()) {
        return Scored { index: None, score: -WIN_SCORE };
    }
    if grid.is_full() {
        return Scored { index: None, score: 0 };
    }

    let maximizing = to_move == me;
    let mut best = Scored {
        index: None,
        score: if maximizing { i32::MIN } else { i32::MAX },
    };

    for index in grid.empty_cells() {
        let Some(child) = grid.with_mark(index, to_move) else {
            continue;
        };
        let score = minimax(child, to_move.opponent(), me).score;

        let better = if maximizing {
            score > best.score
        } else {
            score < best.score
        };
        if better {
            best = Scored {
                index: Some(index),
                score,
            };
        }
    }

    best
}

/// Best cell for `me` to play now
pub fn best_move(grid: &Grid, me: Mark) -> Option<usize> {
    minimax(*grid, me, me).index
}

/// Dispatch on difficulty
pub fn choose<R: Rng + ?Sized>(
    difficulty: Difficulty,
    grid: &Grid,
    me: Mark,
    rng: &mut R,
) -> Option<usize> {
    match difficulty {
        Difficulty::Easy => random_move(grid, rng),
        Difficulty::Hard => best_move(grid, me),
    }
}

// ============================================================================
// COMPUTER PLAYER
// ============================================================================

/// Computer opponent bound to one difficulty, with its own RNG
pub struct ComputerPlayer {
    pub difficulty: Difficulty,
    rng: ChaCha8Rng,
}

impl ComputerPlayer {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Pick a cell for `me` on `grid`
    pub fn choose(&mut self, grid: &Grid, me: Mark) -> Option<usize> {
        choose(self.difficulty, grid, me, &mut self.rng)
    }

    /// Decide and play for whoever is active in `session`
    pub fn play_turn(&mut self, session: &mut GameSession) -> Result<(usize, MoveOutcome), GameError> {
        let index = session.decide(self.difficulty, &mut self.rng)?;
        let outcome = session.apply_move(index, session.active_mark())?;
        Ok((index, outcome))
    }
}

// ============================================================================
// TESTS
// ============================================================================
