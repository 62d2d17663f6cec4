//! Session configuration
//!
//! Mode, difficulty and pacing are read once when a session starts.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Default seconds each side gets per move
pub const DEFAULT_SECONDS_PER_MOVE: u32 = 10;

/// Default pause before the computer answers, in milliseconds
pub const DEFAULT_COMPUTER_DELAY_MS: u64 = 500;

/// Who plays O
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    #[serde(alias = "pvp")]
    HumanVsHuman,
    #[serde(alias = "pvai")]
    HumanVsComputer,
}

/// Computer opponent strength
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Uniform random choice among empty cells
    #[default]
    Easy,
    /// Full-depth minimax
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => f.write_str("easy"),
            Difficulty::Hard => f.write_str("hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" | "random" => Ok(Difficulty::Easy),
            "hard" | "minimax" => Ok(Difficulty::Hard),
            other => anyhow::bail!("Unknown difficulty: {} (expected easy or hard)", other),
        }
    }
}

impl FromStr for GameMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pvp" | "human_vs_human" => Ok(GameMode::HumanVsHuman),
            "pvai" | "human_vs_computer" => Ok(GameMode::HumanVsComputer),
            other => anyhow::bail!("Unknown game mode: {} (expected pvp or pvai)", other),
        }
    }
}

/// Everything needed to start a session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub player1: String,
    pub player2: String,
    pub seconds_per_move: u32,
    pub computer_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::HumanVsHuman,
            difficulty: Difficulty::Easy,
            player1: "Player 1".to_string(),
            player2: "Player 2".to_string(),
            seconds_per_move: DEFAULT_SECONDS_PER_MOVE,
            computer_delay_ms: DEFAULT_COMPUTER_DELAY_MS,
        }
    }
}

impl GameConfig {
    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config.normalized())
    }

    /// Fill blank names and zero timings, and name the computer in pvai mode
    pub fn normalized(mut self) -> Self {
        if self.player1.trim().is_empty() {
            self.player1 = "Player 1".to_string();
        }
        if self.mode == GameMode::HumanVsComputer {
            self.player2 = "Computer".to_string();
        } else if self.player2.trim().is_empty() {
            self.player2 = "Player 2".to_string();
        }
        if self.seconds_per_move == 0 {
            self.seconds_per_move = DEFAULT_SECONDS_PER_MOVE;
        }
        self
    }

    pub fn vs_computer(difficulty: Difficulty) -> Self {
        Self {
            mode: GameMode::HumanVsComputer,
            difficulty,
            ..Default::default()
        }
        .normalized()
    }
}
