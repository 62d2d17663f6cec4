//! Play command - a game against the computer in the terminal
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_rounds()
//! - Level 3: play_round(), read_move()
//! - Level 4: prompt helpers
//!
//! The terminal game has no move clock; the human always plays X.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Args;

use tictak_core::{
    ComputerPlayer, Difficulty, GameConfig, GameSession, GameStatus, Mark, MoveOutcome,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Computer difficulty (easy or hard)
    #[arg(long, default_value = "hard")]
    pub difficulty: Difficulty,

    /// Your name
    #[arg(long, default_value = "Player 1")]
    pub name: String,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = GameConfig {
        player1: args.name,
        ..GameConfig::vs_computer(args.difficulty)
    }
    .normalized();

    let mut session = GameSession::new(&config);
    let mut computer = match seed {
        Some(seed) => ComputerPlayer::with_seed(args.difficulty, seed),
        None => ComputerPlayer::new(args.difficulty),
    };

    tracing::info!("{} vs Computer ({})", config.player1, args.difficulty);

    let stdin = io::stdin();
    let stdout = io::stdout();
    play_rounds(&mut session, &mut computer, &mut stdin.lock(), &mut stdout.lock())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Play rounds until the player declines a rematch or input ends
fn play_rounds<R: BufRead, W: Write>(
    session: &mut GameSession,
    computer: &mut ComputerPlayer,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    loop {
        let Some(status) = play_round(session, computer, input, output)? else {
            return Ok(());
        };
        report_round(session, status, output)?;

        if !ask(input, output, "Play again? [y/N] ")? {
            return Ok(());
        }
        session.restart();
    }
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// One game to a terminal state; None if input ran out first
fn play_round<R: BufRead, W: Write>(
    session: &mut GameSession,
    computer: &mut ComputerPlayer,
    input: &mut R,
    output: &mut W,
) -> Result<Option<GameStatus>> {
    while !session.is_over() {
        if session.is_computer_turn() {
            let (index, outcome) = computer.play_turn(session)?;
            writeln!(output, "Computer plays {}", index)?;
            tracing::debug!("Computer plays {}: {:?}", index, outcome);
            continue;
        }

        writeln!(output, "\n{}", session.grid())?;
        let Some(index) = read_move(input, output, session.active_player().name())? else {
            return Ok(None);
        };

        match session.apply_move(index, Mark::X) {
            Ok(MoveOutcome::Continue { .. }) => {}
            Ok(outcome) => tracing::debug!("Round over: {:?}", outcome),
            Err(e) => writeln!(output, "{}", e)?,
        }
    }

    Ok(Some(session.status()))
}

/// Prompt until a number is entered; None on end of input
fn read_move<R: BufRead, W: Write>(input: &mut R, output: &mut W, name: &str) -> Result<Option<usize>> {
    loop {
        let Some(line) = prompt(input, output, &format!("{} (X), your move [0-8]: ", name))? else {
            return Ok(None);
        };
        match line.parse::<usize>() {
            Ok(index) => return Ok(Some(index)),
            Err(_) => writeln!(output, "Enter a cell number from 0 to 8")?,
        }
    }
}

fn report_round<W: Write>(session: &GameSession, status: GameStatus, output: &mut W) -> Result<()> {
    writeln!(output, "\n{}", session.grid())?;
    match status {
        GameStatus::Won(mark) => writeln!(output, "{} wins!", session.player(mark).name())?,
        GameStatus::Drawn => writeln!(output, "It's a draw!")?,
        GameStatus::AwaitingMove(_) => {}
    }

    let [human, computer] = session.players();
    writeln!(
        output,
        "Score: {} {} - {} {} ({} draws)",
        human.name(),
        human.score(),
        computer.score(),
        computer.name(),
        session.draws()
    )?;
    Ok(())
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<Option<String>> {
    write!(output, "{}", text)?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, text: &str) -> Result<bool> {
    Ok(prompt(input, output, text)?
        .map(|answer| answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
        .unwrap_or(false))
}

// ============================================================================
// TESTS
// ============================================================================
