//! Server state management
//!
//! One live table (session + clock) shared by the HTTP handlers and the
//! deferred clock task. Every transition happens under the table lock.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::{Mutex, MutexGuard};
use tictak_core::{
    Difficulty, GameConfig, GameError, GameSession, GameStatus, MoveOutcome, Tick, TimeoutAction,
    TimerToken, TurnTimer,
};

use crate::scheduler::Scheduler;

/// Work the clock task should do next
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deferred {
    /// Wait one second, then deliver a tick for this countdown
    Tick(TimerToken),
    /// Wait the computer delay, then let the computer move if the countdown is still current
    ComputerReply(TimerToken),
    /// Nothing pending (game over)
    Idle,
}

/// A running game: the session, its countdown and the computer's RNG
pub struct Table {
    pub session: GameSession,
    pub timer: TurnTimer,
    pub config: GameConfig,
    pub message: String,
    rng: ChaCha8Rng,
}

impl Table {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let config = config.normalized();
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let session = GameSession::new(&config);
        let mut table = Self {
            session,
            timer: TurnTimer::new(config.seconds_per_move),
            config,
            message: String::new(),
            rng,
        };
        table.message = table.turn_message();
        table
    }

    /// Start the first countdown
    pub fn begin(&mut self) -> Deferred {
        self.message = self.turn_message();
        self.next_turn()
    }

    /// Fresh board, same players and scores
    pub fn restart(&mut self) -> Deferred {
        self.session.restart();
        self.begin()
    }

    /// A human clicked a cell
    pub fn submit_move(&mut self, index: usize) -> Result<(MoveOutcome, Deferred), GameError> {
        if self.session.is_computer_turn() {
            return Err(GameError::NotYourTurn(self.session.active_mark()));
        }
        let mark = self.session.active_mark();
        let outcome = self.session.apply_move(index, mark)?;
        tracing::info!("{} plays {}: {:?}", mark, index, outcome);
        Ok((outcome, self.after_move(outcome)))
    }

    /// Let the computer move if the countdown it was scheduled for is still live
    pub fn computer_reply(&mut self, token: TimerToken) -> Deferred {
        if !self.timer.is_current(token) || !self.session.is_computer_turn() {
            return Deferred::Idle;
        }
        self.computer_move()
    }

    /// One second elapsed on countdown `token`
    pub fn on_tick(&mut self, token: TimerToken) -> Deferred {
        match self.timer.tick(token) {
            Tick::Stale => Deferred::Idle,
            Tick::Running(left) => {
                tracing::debug!("{}s left for {}", left, self.session.active_mark());
                Deferred::Tick(token)
            }
            Tick::Expired => match self.session.handle_timeout() {
                TimeoutAction::Ignored => Deferred::Idle,
                TimeoutAction::ComputerToMove => {
                    tracing::info!("Computer ran out of time, moving now");
                    self.computer_move()
                }
                TimeoutAction::TurnPassed(mark) => {
                    // Only the turn moves; a computer on turn waits for its own expiry
                    tracing::info!("Time up, turn passes to {}", mark);
                    self.message = format!("Time up! {}", self.turn_message());
                    Deferred::Tick(self.timer.restart())
                }
            },
        }
    }

    /// Ask the decision procedure for the side to move without playing it.
    /// Draws from a copy of the RNG, so the computer's own moves are unaffected.
    pub fn decision(&self, difficulty: Difficulty) -> Result<usize, GameError> {
        let mut rng = self.rng.clone();
        self.session.decide(difficulty, &mut rng)
    }

    fn computer_move(&mut self) -> Deferred {
        let difficulty = self.session.difficulty();
        let mark = self.session.active_mark();
        let result = self
            .session
            .decide(difficulty, &mut self.rng)
            .and_then(|index| self.session.apply_move(index, mark).map(|o| (index, o)));

        match result {
            Ok((index, outcome)) => {
                tracing::info!("Computer ({}) plays {}: {:?}", difficulty, index, outcome);
                self.after_move(outcome)
            }
            Err(e) => {
                // The engine ends the game before the board fills, so this is a bug
                tracing::warn!("Computer could not move: {}", e);
                self.timer.stop();
                Deferred::Idle
            }
        }
    }

    fn after_move(&mut self, outcome: MoveOutcome) -> Deferred {
        match outcome {
            MoveOutcome::Won { winner, .. } => {
                self.timer.stop();
                self.message = format!("{} wins!", self.session.player(winner).name());
                tracing::info!("{}", self.message);
                Deferred::Idle
            }
            MoveOutcome::Drawn => {
                self.timer.stop();
                self.message = "It's a draw!".to_string();
                tracing::info!("{}", self.message);
                Deferred::Idle
            }
            MoveOutcome::Continue { .. } => {
                self.message = self.turn_message();
                self.next_turn()
            }
        }
    }

    /// Restart the countdown and say what the clock task waits for
    fn next_turn(&mut self) -> Deferred {
        let token = self.timer.restart();
        if self.session.is_computer_turn() {
            Deferred::ComputerReply(token)
        } else {
            Deferred::Tick(token)
        }
    }

    fn turn_message(&self) -> String {
        match self.session.status() {
            GameStatus::AwaitingMove(mark) => {
                format!("{} ({})'s turn", self.session.player(mark).name(), mark)
            }
            GameStatus::Won(mark) => format!("{} wins!", self.session.player(mark).name()),
            GameStatus::Drawn => "It's a draw!".to_string(),
        }
    }
}

/// Server-wide shared state
pub struct ServerState {
    pub table: Mutex<Option<Table>>,
    pub scheduler: Scheduler,
    /// Used for any field a start request leaves out
    pub defaults: GameConfig,
    /// Fixed seed for the computer's RNG (None = entropy)
    pub seed: Option<u64>,
}

impl ServerState {
    pub fn new() -> Self {
        Self::with_defaults(GameConfig::default(), None)
    }

    pub fn with_defaults(defaults: GameConfig, seed: Option<u64>) -> Self {
        Self {
            table: Mutex::new(None),
            scheduler: Scheduler::new(),
            defaults,
            seed,
        }
    }

    pub fn table(&self) -> MutexGuard<'_, Option<Table>> {
        self.table.lock().unwrap()
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}
