//! # Gigshift Headless Entry Point
//!
//! Runs a scripted shift simulation and prints the floor, HUD, and log to
//! stdout. Interactive front ends link the library instead; this binary
//! exists to exercise a whole session end to end from one seed.

use clap::Parser;
use gigshift::{
    GameState, GlyphGrid, HudSnapshot, PlayerIntent, SessionConfig, ShiftResult, StairDirection,
    TileKind,
};
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Command line arguments for the Gigshift simulator.
#[derive(Parser, Debug)]
#[command(name = "gigshift")]
#[command(about = "A satirical gig-economy ASCII roguelike, headless simulation mode")]
#[command(version)]
struct Args {
    /// Random seed for the session
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of turns to simulate
    #[arg(short, long, default_value_t = 500)]
    turns: u32,

    /// Player name for the run
    #[arg(long, default_value = "Dad")]
    name: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ShiftResult<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .parse_filters(&args.log_level)
        .init();

    info!("Starting Gigshift v{}", gigshift::VERSION);

    let seed = args.seed.unwrap_or(12345);
    let mut session = SessionConfig::new(seed);
    session.player_name = args.name.clone();

    let mut state = GameState::new(session)?;
    // A separate RNG drives the scripted walker so the session's own
    // stream stays identical to an interactive run with the same inputs.
    let mut walker = StdRng::seed_from_u64(seed ^ 0xD1CE);

    for _ in 0..args.turns {
        if !state.is_running() {
            break;
        }

        let on_stairs = state.map.tile_at(state.player.pos) == TileKind::StairsDown;
        let intent = if on_stairs {
            PlayerIntent::UseStairs(StairDirection::Down)
        } else {
            let (dx, dy) = match walker.gen_range(0..4) {
                0 => (0, -1),
                1 => (0, 1),
                2 => (-1, 0),
                _ => (1, 0),
            };
            PlayerIntent::Move { dx, dy }
        };

        state.apply_intent(intent)?;
    }

    let grid = GlyphGrid::capture(&state);
    for row in &grid.rows {
        println!("{}", row);
    }

    let hud = HudSnapshot::capture(&state);
    println!(
        "\n{} | floor {} | HP {}/{} | {} on hand | alimony {} due in {}d | {} is {}",
        hud.shift_name,
        hud.floor,
        hud.health,
        hud.max_health,
        gigshift::utils::format_money(hud.money),
        gigshift::utils::format_money(hud.alimony_due),
        hud.days_until_payment,
        hud.child_name,
        hud.child_age,
    );

    println!("\nRecent log:");
    for message in state.recent_messages(5) {
        println!("  {}", message);
    }

    if let Some(summary) = state.final_summary() {
        println!("\nFinal record:");
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
