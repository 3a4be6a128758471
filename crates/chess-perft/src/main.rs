//! Perft runner.
//!
//! Replays an optional list of coordinate moves from the starting position,
//! then counts leaf nodes of the legal move tree to the requested depth.

use anyhow::{bail, Context};
use chess_engine::movegen::perft::{perft, perft_divide};
use chess_engine::{GameRecord, QueenPromotion};
use clap::Parser;
use std::time::Instant;

/// Count legal move tree leaves from the starting position.
#[derive(Parser)]
#[command(name = "chess-perft")]
#[command(about = "Counts legal move tree leaves from the starting position")]
struct Args {
    /// Search depth in plies
    #[arg(short, long, default_value = "3")]
    depth: u32,

    /// Print the node count below each root move
    #[arg(long)]
    divide: bool,

    /// Moves to play before counting, in coordinate form (e2e4 or e2-e4)
    moves: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut record = GameRecord::new();
    for (ply, text) in args.moves.iter().enumerate() {
        record
            .play_coordinates(text, &mut QueenPromotion)
            .with_context(|| format!("cannot play {text} after {ply} plies"))?;
    }
    if args.depth == 0 {
        bail!("depth must be at least 1");
    }

    let position = record.position();
    tracing::info!(depth = args.depth, plies = record.len(), status = %record.status(), "starting perft");
    println!("{position}\n");

    let started = Instant::now();
    let total = if args.divide {
        let results = perft_divide(position, args.depth);
        for (mov, nodes) in &results {
            println!("{mov}: {nodes}");
        }
        println!();
        results.iter().map(|(_, nodes)| nodes).sum()
    } else {
        perft(position, args.depth)
    };
    let elapsed = started.elapsed();

    println!("Nodes searched: {total}");
    tracing::info!(nodes = total, elapsed_ms = elapsed.as_millis() as u64, "perft finished");
    Ok(())
}
