//! Headless driver: plays a session with a greedy autoplayer and prints
//! every event.
//!
//! ```text
//! trio-sim --seed 7 --dt 0.016
//! RUST_LOG=trio_board=debug trio-sim --config board.toml
//! ```

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use trio_board::{BoardConfig, GameEvent, MatchController, PieceId, SelectOutcome};

#[derive(Debug, Parser)]
#[command(name = "trio-sim", about = "Play a trio-board session headlessly")]
struct Args {
    /// TOML board configuration; defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured RNG seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Seconds per simulated frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Give up after this many frames
    #[arg(long, default_value_t = 100_000)]
    max_ticks: u64,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => BoardConfig::load(path)?,
        None => BoardConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    info!(seed = config.seed, spawn_count = config.spawn_count, "starting session");
    let mut game = MatchController::setup(&config)?;
    println!("{}", game.board().grid());

    let mut ticks = 0u64;
    let mut stuck: Vec<PieceId> = Vec::new();
    while !game.outcome().is_terminal() && ticks < args.max_ticks {
        if game.active_piece().is_none() {
            let Some(piece) = game.suggest_piece(&stuck) else {
                println!("no selectable piece left");
                break;
            };
            if let SelectOutcome::Rejected(reason) = game.select_piece(piece)? {
                println!("{piece} rejected: {reason}");
                break;
            }
        }

        game.tick(args.dt)?;
        ticks += 1;

        for event in game.drain_events() {
            match event {
                GameEvent::MoveAbandoned { piece, .. } => stuck.push(piece),
                GameEvent::MovementComplete { .. } => stuck.clear(),
                _ => {}
            }
            print_event(&event);
        }
    }

    println!("{}", game.board().tally());
    println!("{} after {ticks} ticks, score {}", game.outcome(), game.score());
    Ok(())
}

fn print_event(event: &GameEvent) {
    match event {
        GameEvent::MoveStarted { piece, slot, target } => println!("{piece} -> {slot} at {target}"),
        GameEvent::MoveRejected { piece, reason } => println!("{piece} rejected: {reason}"),
        GameEvent::MoveCancelled { piece, cell } => println!("{piece} cancelled at {cell}"),
        GameEvent::MoveAbandoned { piece, cell } => println!("{piece} stuck at {cell}"),
        GameEvent::MovementComplete { piece, coord } => println!("{piece} parked at {coord}"),
        GameEvent::ColorRemoved { color, count } => println!("removed {count} {color}"),
        GameEvent::ScoreChanged { score } => println!("score {score}"),
        GameEvent::GameEnded { outcome, final_score } => {
            println!("game over: {outcome} ({final_score})")
        }
    }
}
