//! # Gigshift
//!
//! A satirical gig-economy ASCII roguelike. The player works procedurally
//! generated dungeon floors ("shifts"), fights workplace hazards, scrapes
//! together money, and has to cover rent and a monthly alimony payment or
//! lose everything.
//!
//! ## Architecture Overview
//!
//! Gigshift is a simulation core with pure-data edges. The main pieces:
//!
//! - **Game State**: one session object that owns the player, the current
//!   floor, the calendar, and the payment cycle
//! - **Dungeon Generation**: room-and-corridor floor layouts populated with
//!   job-themed enemies, items, and NPCs
//! - **Turn Engine**: one accepted player intent advances exactly one turn;
//!   enemies, the calendar, and random life events resolve in a fixed order
//! - **Rendering Snapshots**: glyph grids and HUD scalars pulled by a
//!   front end once per turn; the core never touches a display API
//!
//! ## Integration
//!
//! Front ends feed [`PlayerIntent`] values in and pull [`GlyphGrid`] /
//! [`HudSnapshot`] data out. Feedback hooks (sound, screen shake) subscribe
//! to the [`Occurrence`] stream; a score keeper consumes the final
//! [`ScoreSummary`]. All randomness flows through one seeded generator, so
//! a whole run is reproducible from its seed.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod utils;

// Explicit re-exports for the types front ends are expected to touch.
pub use game::{
    entities::Enemy,
    player::{CarriedItem, MoveOutcome, Player},
    state::{EndReason, GamePhase, GameState, ScoreSummary, SessionConfig, StartingJob},
    world::{ConsumableEffect, GameMap, GroundItem, ItemKind, Npc, TileKind},
    Direction, EntityId, Occurrence, Position, StairDirection,
};
pub use generation::{
    themes::{job_theme_for_floor, JobTheme},
    FloorGenerator, GenerationConfig, Generator, Room,
};
pub use input::PlayerIntent;
pub use rendering::{GlyphGrid, HudSnapshot};

/// Core error type for the Gigshift engine.
#[derive(thiserror::Error, Debug)]
pub enum ShiftError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Intent cannot be performed
    #[error("Invalid intent: {0}")]
    InvalidIntent(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    /// Content tables are inconsistent
    #[error("Content error: {0}")]
    Content(String),
}

/// Result type used throughout the Gigshift codebase.
pub type ShiftResult<T> = Result<T, ShiftError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game tuning constants.
pub mod config {
    /// Floor width in tiles
    pub const MAP_WIDTH: usize = 50;

    /// Floor height in tiles
    pub const MAP_HEIGHT: usize = 25;

    /// Player starting health
    pub const STARTING_HEALTH: i32 = 100;

    /// Player starting money
    pub const STARTING_MONEY: i64 = 0;

    /// Player starting attack power
    pub const STARTING_ATTACK: i32 = 10;

    /// Player starting defense
    pub const STARTING_DEFENSE: i32 = 5;

    /// Experience required for the first level-up
    pub const STARTING_EXP_TO_LEVEL: i32 = 50;

    /// Inventory slot limit
    pub const MAX_INVENTORY: usize = 10;

    /// Monthly alimony at game start
    pub const STARTING_ALIMONY: i64 = 500;

    /// Yearly cost-of-living increase on the alimony amount
    pub const ALIMONY_INCREASE_PER_YEAR: i64 = 100;

    /// Monthly rent, due alongside the alimony
    pub const RENT: i64 = 200;

    /// Days in a payment month
    pub const DAYS_PER_MONTH: u32 = 30;

    /// Months in a year
    pub const MONTHS_PER_YEAR: u32 = 12;

    /// Child age at game start
    pub const CHILD_STARTING_AGE: u32 = 5;

    /// Child age that ends the game in victory
    pub const CHILD_ADULT_AGE: u32 = 18;

    /// Consecutive missed alimony payments before jail
    pub const MAX_MISSED_PAYMENTS: u32 = 3;

    /// Turns that make up one in-game day
    pub const TURNS_PER_DAY: u32 = 50;

    /// Turns a visitation period lasts
    pub const VISITATION_TURNS: u32 = 10;

    /// Minimum room dimension in tiles
    pub const MIN_ROOM_SIZE: usize = 4;

    /// Maximum room dimension in tiles
    pub const MAX_ROOM_SIZE: usize = 10;

    /// Room placement attempts per floor (not guaranteed successes)
    pub const MAX_ROOM_ATTEMPTS: usize = 15;

    /// Base enemy count per floor, before the per-floor bonus
    pub const ENEMIES_PER_FLOOR: usize = 5;

    /// Themed item spawns per floor
    pub const ITEMS_PER_FLOOR: usize = 8;

    /// Base money item spawns per floor, before the per-floor bonus
    pub const MONEY_PER_FLOOR: usize = 10;

    /// Manhattan distance at which enemies start chasing the player
    pub const CHASE_RADIUS: u32 = 8;

    /// The boss only clocks in on floors that are multiples of this
    pub const BOSS_FLOOR_INTERVAL: u32 = 5;
}
