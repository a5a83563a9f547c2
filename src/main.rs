use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gambit_core::{GameState, Position, divide, perft};
use gambit_engine::{SearchLimits, Searcher};
use tracing::info;

/// Chess rules engine tools: move generator verification and self-play.
#[derive(Debug, Parser)]
#[command(name = "gambit", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Count leaf nodes of the legal move tree.
    Perft {
        depth: u32,
        /// Position to start from; defaults to the standard start.
        fen: Option<String>,
    },
    /// Per-move leaf counts, sorted by move.
    Divide { depth: u32, fen: Option<String> },
    /// Let the searcher play both sides until the game ends.
    Selfplay {
        #[arg(default_value_t = 3)]
        depth: u8,
        fen: Option<String>,
        /// Stop after this many plies even if the game is still running.
        #[arg(long, default_value_t = 300)]
        max_plies: usize,
    },
}

fn parse_position(fen: Option<&str>) -> Result<Position> {
    match fen {
        Some(fen) => fen.parse().with_context(|| format!("invalid FEN \"{fen}\"")),
        None => Ok(Position::starting()),
    }
}

fn run_perft(depth: u32, fen: Option<&str>) -> Result<()> {
    let position = parse_position(fen)?;
    let start = Instant::now();
    let nodes = perft(&position, depth);
    let elapsed = start.elapsed();
    let nps = (u128::from(nodes) * 1000) / elapsed.as_millis().max(1);
    info!(depth, nodes, elapsed_ms = elapsed.as_millis() as u64, "perft finished");
    println!("{nodes} nodes in {:.3}s ({nps} nps)", elapsed.as_secs_f64());
    Ok(())
}

fn run_divide(depth: u32, fen: Option<&str>) -> Result<()> {
    let position = parse_position(fen)?;
    let split = divide(&position, depth);
    for (mv, nodes) in &split {
        println!("{mv}: {nodes}");
    }
    let total: u64 = split.iter().map(|&(_, nodes)| nodes).sum();
    println!();
    println!("moves: {}", split.len());
    println!("nodes: {total}");
    Ok(())
}

fn run_selfplay(depth: u8, fen: Option<&str>, max_plies: usize) -> Result<()> {
    let mut game = GameState::from_position(parse_position(fen)?);
    let searcher = Searcher::new();
    let limits = SearchLimits::depth(depth);
    info!(fen = %game.current(), depth, "self-play started");

    while !game.status().is_over() && game.ply_count() < max_plies {
        let result = searcher
            .choose_move(game.current(), &limits)
            .context("search failed in a running game")?;
        game.submit_move(result.best_move)
            .with_context(|| format!("searcher chose a rejected move {}", result.best_move))?;
        println!("{:>3}. {} (score {}, nodes {})", game.ply_count(), result.best_move, result.score, result.nodes);
    }

    println!("{}", game.current().pretty());
    println!("{}", game.current());
    println!("result: {}", game.status());
    info!(plies = game.ply_count(), status = %game.status(), "self-play finished");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    info!("gambit starting");

    match cli.command {
        Command::Perft { depth, fen } => run_perft(depth, fen.as_deref()),
        Command::Divide { depth, fen } => run_divide(depth, fen.as_deref()),
        Command::Selfplay { depth, fen, max_plies } => run_selfplay(depth, fen.as_deref(), max_plies),
    }
}
