//! Game session and move engine

use crate::ai;
use crate::board::{Grid, Mark, CELL_COUNT};
use crate::config::{Difficulty, GameConfig, GameMode};
use rand::Rng;
use serde::{Deserialize, Serialize};

// ============================================================================
// CORE TYPES
// ============================================================================

/// Why a move or decision was refused. None of these are fatal: a refused
/// move leaves the session exactly as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Cell {0} is already occupied")]
    CellOccupied(usize),

    #[error("Game is already over")]
    GameAlreadyOver,

    #[error("Cell index {0} is off the board")]
    OutOfBounds(usize),

    #[error("It is not {0}'s turn")]
    NotYourTurn(Mark),

    #[error("No empty cell is available")]
    NoAvailableMove,
}

/// A seat at the table. The mark is fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    mark: Mark,
    score: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, mark: Mark) -> Self {
        Self {
            name: name.into(),
            mark,
            score: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }

    pub fn score(&self) -> u32 {
        self.score
    }
}

/// Turn protocol state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    AwaitingMove(Mark),
    Won(Mark),
    Drawn,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::AwaitingMove(_))
    }
}

/// What an accepted move led to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Game goes on with `next` to move
    Continue { next: Mark },
    Won { winner: Mark, line: [usize; 3] },
    Drawn,
}

/// What a turn-timer expiry did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeoutAction {
    /// Computer's turn: it must move now
    ComputerToMove,
    /// A human ran out of time; the turn went to this mark, no cell was marked
    TurnPassed(Mark),
    /// Game is already over
    Ignored,
}

// ============================================================================
// GAME SESSION
// ============================================================================

/// One interactive session: a grid, two players and cumulative scores.
/// X (the human) always starts; O is the second human or the computer.
#[derive(Clone, Debug)]
pub struct GameSession {
    grid: Grid,
    players: [Player; 2],
    active: Mark,
    status: GameStatus,
    draws: u32,
    mode: GameMode,
    difficulty: Difficulty,
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Self {
        let config = config.clone().normalized();
        Self {
            grid: Grid::new(),
            players: [
                Player::new(config.player1, Mark::X),
                Player::new(config.player2, Mark::O),
            ],
            active: Mark::X,
            status: GameStatus::AwaitingMove(Mark::X),
            draws: 0,
            mode: config.mode,
            difficulty: config.difficulty,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Mark whose turn it is, or who made the last move once the game is over
    pub fn active_mark(&self) -> Mark {
        self.active
    }

    pub fn active_player(&self) -> &Player {
        self.player(self.active)
    }

    pub fn player(&self, mark: Mark) -> &Player {
        &self.players[seat(mark)]
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// True when the computer plays O and O is to move
    pub fn is_computer_turn(&self) -> bool {
        self.mode == GameMode::HumanVsComputer && self.active == Mark::O && !self.is_over()
    }

    // ========================================================================
    // MOVE ENGINE
    // ========================================================================

    /// Place `mark` at `index` and advance the turn protocol.
    /// This is the only way grid contents change during play.
    pub fn apply_move(&mut self, index: usize, mark: Mark) -> Result<MoveOutcome, GameError> {
        if self.is_over() {
            return Err(GameError::GameAlreadyOver);
        }
        if index >= CELL_COUNT {
            return Err(GameError::OutOfBounds(index));
        }
        if mark != self.active {
            return Err(GameError::NotYourTurn(mark));
        }
        if !self.grid.cells()[index].is_empty() {
            return Err(GameError::CellOccupied(index));
        }

        self.grid.set(index, mark);

        // Only the mover can have completed a line
        if let Some(line) = self.grid.winning_line(mark) {
            self.status = GameStatus::Won(mark);
            self.players[seat(mark)].score += 1;
            return Ok(MoveOutcome::Won { winner: mark, line });
        }

        if self.grid.is_full() {
            self.status = GameStatus::Drawn;
            self.draws += 1;
            return Ok(MoveOutcome::Drawn);
        }

        self.switch_active_player();
        Ok(MoveOutcome::Continue { next: self.active })
    }

    pub fn check_win(&self, mark: Mark) -> bool {
        self.grid.is_win(mark)
    }

    /// Completed line of the winner, if the game was won
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        match self.status {
            GameStatus::Won(mark) => self.grid.winning_line(mark),
            _ => None,
        }
    }

    pub fn is_full(&self) -> bool {
        self.grid.is_full()
    }

    /// Hand the turn to the other player. No effect once the game is over.
    pub fn switch_active_player(&mut self) {
        if self.is_over() {
            return;
        }
        self.active = self.active.opponent();
        self.status = GameStatus::AwaitingMove(self.active);
    }

    /// Fresh grid with X to move; scores and draws are kept
    pub fn restart(&mut self) {
        self.grid = Grid::new();
        self.active = Mark::X;
        self.status = GameStatus::AwaitingMove(Mark::X);
    }

    /// Pick a cell for the side to move. Reads the grid, never writes it.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<usize, GameError> {
        if self.is_over() {
            return Err(GameError::NoAvailableMove);
        }
        ai::choose(difficulty, &self.grid, self.active, rng).ok_or(GameError::NoAvailableMove)
    }

    /// The per-move timer ran out.
    ///
    /// On the computer's turn the caller must make it move. On a human turn
    /// the turn simply passes: the skipped player places nothing and no
    /// score changes.
    pub fn handle_timeout(&mut self) -> TimeoutAction {
        if self.is_over() {
            return TimeoutAction::Ignored;
        }
        if self.is_computer_turn() {
            return TimeoutAction::ComputerToMove;
        }
        self.switch_active_player();
        TimeoutAction::TurnPassed(self.active)
    }
}

fn seat(mark: Mark) -> usize {
    match mark {
        Mark::X => 0,
        Mark::O => 1,
    }
}

// ============================================================================
// TESTS
// ============================================================================
