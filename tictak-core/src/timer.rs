//! Per-move countdown
//!
//! The timer itself never touches the grid. It only counts seconds for the
//! current turn and hands out a generation token, so a tick scheduled for an
//! earlier turn can be recognised and dropped.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Generations are unique across every timer in the process, so a token
/// from a replaced session can never match a new one
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

/// Identifies one countdown. Any restart makes older tokens stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerToken(u64);

/// Result of delivering one tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// The tick belongs to a countdown that was restarted or stopped
    Stale,
    /// Seconds left after this tick
    Running(u32),
    /// The countdown hit zero; it is stopped until the next restart
    Expired,
}

#[derive(Clone, Debug)]
pub struct TurnTimer {
    seconds_per_move: u32,
    time_left: u32,
    generation: u64,
    running: bool,
}

impl TurnTimer {
    pub fn new(seconds_per_move: u32) -> Self {
        Self {
            seconds_per_move,
            time_left: seconds_per_move,
            generation: 0,
            running: false,
        }
    }

    pub fn seconds_per_move(&self) -> u32 {
        self.seconds_per_move
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Cancel the current countdown and start a fresh one
    pub fn restart(&mut self) -> TimerToken {
        self.generation = next_generation();
        self.time_left = self.seconds_per_move;
        self.running = true;
        TimerToken(self.generation)
    }

    /// Stop without starting a new countdown (game over)
    pub fn stop(&mut self) {
        self.generation = next_generation();
        self.running = false;
    }

    pub fn is_current(&self, token: TimerToken) -> bool {
        self.running && token.0 == self.generation
    }

    /// Deliver one elapsed second
    pub fn tick(&mut self, token: TimerToken) -> Tick {
        if !self.is_current(token) {
            return Tick::Stale;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.running = false;
            Tick::Expired
        } else {
            Tick::Running(self.time_left)
        }
    }
}

impl Default for TurnTimer {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_SECONDS_PER_MOVE)
    }
}
