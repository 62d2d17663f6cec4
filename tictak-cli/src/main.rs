//! TICTAK CLI - Command-line interface
//!
//! Commands:
//! - serve: Start the HTTP server for the browser board
//! - play: Play a game against the computer in the terminal
//! - match: Run computer-vs-computer batches

mod match_cmd;
mod play;
mod server;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tictak")]
#[command(about = "TICTAK tic tac toe with a minimax opponent")]
#[command(version)]
struct Cli {
    /// Seed for the computer's RNG (random if omitted)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve(server::ServerArgs),
    /// Play against the computer in the terminal
    Play(play::PlayArgs),
    /// Computer-vs-computer games
    Match(match_cmd::MatchArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => server::run(args, cli.seed),
        Commands::Play(args) => play::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
    }
}
