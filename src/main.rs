//! Neon Pinball headless driver
//!
//! Runs the table in attract mode for a fixed number of frames, the way a
//! render loop would: read input, tick, drain audio cues, snapshot.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use neon_pinball::attract::AttractMode;
use neon_pinball::audio::{LogSink, Mixer};
use neon_pinball::sim::{BoardDef, GameState, tick};
use neon_pinball::{EventQueue, PhysicsConfig};

#[derive(Debug, Parser)]
#[command(name = "neon-pinball", about = "Run the pinball simulation headless")]
struct Args {
    /// Frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u64,
    /// Seed for the attract-mode player
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Board layout JSON (defaults to the classic table)
    #[arg(long)]
    board: Option<PathBuf>,
    /// Physics config JSON
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the final render snapshot as JSON
    #[arg(long)]
    snapshot: bool,
    /// Write the classic board layout as JSON and exit
    #[arg(long)]
    dump_board: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.dump_board {
        println!("{}", BoardDef::classic().to_json()?);
        return Ok(());
    }

    let config = match &args.config {
        Some(path) => PhysicsConfig::load(path)?,
        None => PhysicsConfig::default(),
    };
    let board_def = match &args.board {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading board {}", path.display()))?;
            BoardDef::from_json(&json)?
        }
        None => BoardDef::classic(),
    };

    let mut state = GameState::new(board_def.build()?, config);
    let mut attract = AttractMode::new(args.seed);
    let mut events = EventQueue::new();
    let mixer = Mixer::default();
    let mut sink = LogSink::default();
    let mut best_score = 0;
    let mut games = 1;

    log::info!("Neon Pinball starting: {} frames, seed {}", args.frames, args.seed);

    for _ in 0..args.frames {
        let input = attract.next_input(&state);
        if input.restart {
            best_score = best_score.max(state.score);
            games += 1;
        }
        tick(&mut state, &input, &mut events);
        events.dispatch(&mixer, &mut sink);
    }
    best_score = best_score.max(state.score);

    log::info!(
        "Finished: {} games, best score {}, {} audio cues",
        games,
        best_score,
        sink.played
    );

    if args.snapshot {
        println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    } else {
        println!(
            "score {} lives {} best {} games {}",
            state.score, state.lives, best_score, games
        );
    }
    Ok(())
}
