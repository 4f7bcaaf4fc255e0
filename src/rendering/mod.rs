//! # Rendering Snapshots
//!
//! Pure-data views a front end pulls once per turn: the full glyph grid
//! and the HUD scalars. The core never pushes to a display API; how these
//! get drawn (DOM, terminal, anything) is the front end's business.
//!
//! Glyph precedence per cell: player over NPC over living enemy over item
//! over tile.

use crate::game::state::GameState;
use crate::generation::themes::JOB_THEMES;
use serde::{Deserialize, Serialize};

/// Glyph used for the player in the grid snapshot.
pub const PLAYER_GLYPH: char = '@';

/// A full-floor character grid, one string per row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphGrid {
    pub width: usize,
    pub height: usize,
    pub rows: Vec<String>,
}

impl GlyphGrid {
    /// Captures the current floor as a glyph grid.
    pub fn capture(state: &GameState) -> Self {
        let map = &state.map;
        let mut rows = Vec::with_capacity(map.height);

        for y in 0..map.height {
            let mut row = String::with_capacity(map.width);
            for x in 0..map.width {
                let pos = crate::game::Position::new(x as i32, y as i32);

                let glyph = if state.player.pos == pos {
                    PLAYER_GLYPH
                } else if let Some(npc) = map.npc_at(pos) {
                    npc.glyph
                } else if let Some(enemy) = map.enemy_at(pos) {
                    enemy.glyph
                } else if let Some(item) = map.item_at(pos) {
                    item.glyph
                } else {
                    map.tile_at(pos).glyph()
                };

                row.push(glyph);
            }
            rows.push(row);
        }

        Self { width: map.width, height: map.height, rows }
    }
}

/// The scalar fields a HUD shows, captured once per turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub health: i32,
    pub max_health: i32,
    pub money: i64,
    pub alimony_due: i64,
    pub days_until_payment: i32,
    pub missed_payments: u32,
    pub child_name: String,
    pub child_age: u32,
    pub floor: u32,
    pub shift_name: String,
    pub level: u32,
    pub attack: i32,
    pub defense: i32,
    pub visitation_active: bool,
}

impl HudSnapshot {
    /// Captures the HUD scalars from the session.
    pub fn capture(state: &GameState) -> Self {
        let theme = &JOB_THEMES[state.map.theme_index];
        Self {
            health: state.player.health,
            max_health: state.player.max_health,
            money: state.player.money,
            alimony_due: state.alimony_amount,
            days_until_payment: state.days_until_payment,
            missed_payments: state.missed_payments,
            child_name: state.session().child_name.clone(),
            child_age: state.child_age,
            floor: state.current_floor,
            shift_name: theme.name.to_string(),
            level: state.player.level,
            attack: state.player.attack_power(),
            defense: state.player.defense + state.player.armor_bonus(),
            visitation_active: state.visitation_active,
        }
    }
}
