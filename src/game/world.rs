//! # Floor Representation
//!
//! The tile grid for a single shift floor plus everything standing on it:
//! rooms, enemies, ground items, and at most one NPC. A floor is
//! regenerated wholesale on every stair transition, so all of this state is
//! floor-scoped; only the player survives the move.

use crate::game::entities::Enemy;
use crate::game::{EntityId, Position};
use crate::generation::Room;
use serde::{Deserialize, Serialize};

/// The kinds of tile a floor cell can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Wall,
    Floor,
    StairsDown,
    StairsUp,
    DoorClosed,
    DoorOpen,
}

impl TileKind {
    /// Everything except a wall can be stepped onto.
    pub fn is_walkable(self) -> bool {
        self != TileKind::Wall
    }

    /// Display glyph for this tile.
    pub fn glyph(self) -> char {
        match self {
            TileKind::Wall => '#',
            TileKind::Floor => '.',
            TileKind::StairsDown => '>',
            TileKind::StairsUp => '<',
            TileKind::DoorClosed => '+',
            TileKind::DoorOpen => '/',
        }
    }
}

/// Effect a consumable applies when used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsumableEffect {
    Heal,
}

/// The closed set of item categories. Every handler matches exhaustively on
/// this, so a new category cannot be silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    /// Cash on the ground, magnitude resolved at spawn time
    Money(i64),
    /// Single-use item applied on pickup or from the inventory
    Consumable { effect: ConsumableEffect, amount: i32 },
    /// Adds its bonus to attack power while equipped
    Weapon(i32),
    /// Adds its bonus to defense while equipped
    Armor(i32),
}

/// An item lying on the floor. Ownership moves to the player the instant it
/// is picked up; an item is never on the ground and held at the same time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundItem {
    pub pos: Position,
    pub glyph: char,
    pub name: String,
    pub kind: ItemKind,
    pub description: String,
}

/// A friendly coworker. NPCs speak once, may hand over money or an item,
/// and afterwards just nod; they are flagged, never removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Npc {
    pub id: EntityId,
    pub pos: Position,
    pub glyph: char,
    pub name: String,
    pub dialogue: Vec<String>,
    /// Inclusive money gift range; [0, 0] means no money
    pub money_gift: [i64; 2],
    /// Item spec key handed over on first talk, if any
    pub item_gift: Option<String>,
    pub spoken: bool,
}

/// One generated shift floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMap {
    pub width: usize,
    pub height: usize,
    tiles: Vec<TileKind>,
    pub rooms: Vec<Room>,
    pub enemies: Vec<Enemy>,
    pub items: Vec<GroundItem>,
    pub npcs: Vec<Npc>,
    pub stairs_down: Option<Position>,
    pub stairs_up: Option<Position>,
    /// Index into the job theme table used to populate this floor
    pub theme_index: usize,
}

impl GameMap {
    /// Creates an all-wall floor of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            tiles: vec![TileKind::Wall; width * height],
            rooms: Vec::new(),
            enemies: Vec::new(),
            items: Vec::new(),
            npcs: Vec::new(),
            stairs_down: None,
            stairs_up: None,
            theme_index: 0,
        }
    }

    /// Checks whether a position lies inside the grid.
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.width
            && (pos.y as usize) < self.height
    }

    /// Looks up the tile at a position. Out-of-bounds reads as Wall.
    pub fn tile_at(&self, pos: Position) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[self.index(pos)]
    }

    /// Sets a tile; out-of-bounds writes are ignored.
    pub fn set_tile(&mut self, pos: Position, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    /// Checks whether a position can be stepped onto.
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.tile_at(pos).is_walkable()
    }

    /// Finds the living enemy at a position, if any. By construction at
    /// most one lives on any cell.
    pub fn enemy_at(&self, pos: Position) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.pos == pos && e.is_alive())
    }

    /// Mutable lookup of an enemy by ID.
    pub fn enemy_mut(&mut self, id: EntityId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    /// Removes an enemy from the floor (after it has been defeated).
    pub fn remove_enemy(&mut self, id: EntityId) {
        self.enemies.retain(|e| e.id != id);
    }

    /// Finds the ground item at a position, if any.
    pub fn item_at(&self, pos: Position) -> Option<&GroundItem> {
        self.items.iter().find(|i| i.pos == pos)
    }

    /// Removes and returns the ground item at a position.
    pub fn take_item_at(&mut self, pos: Position) -> Option<GroundItem> {
        let index = self.items.iter().position(|i| i.pos == pos)?;
        Some(self.items.remove(index))
    }

    /// Finds the NPC at a position, if any.
    pub fn npc_at(&self, pos: Position) -> Option<&Npc> {
        self.npcs.iter().find(|n| n.pos == pos)
    }

    /// Mutable lookup of the NPC at a position.
    pub fn npc_at_mut(&mut self, pos: Position) -> Option<&mut Npc> {
        self.npcs.iter_mut().find(|n| n.pos == pos)
    }

    /// Where the player enters this floor: the first room's center, or a
    /// fixed corner fallback on a degenerate floor with no rooms.
    pub fn player_start_position(&self) -> Position {
        self.rooms
            .first()
            .map(|room| room.center())
            .unwrap_or(Position::new(1, 1))
    }

    fn index(&self, pos: Position) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}
