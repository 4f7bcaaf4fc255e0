//! # Floor Generation
//!
//! Procedural shift-floor layout using a room-and-corridor algorithm, plus
//! the themed population pass that stocks the floor with enemies, money,
//! items, and at most one NPC.
//!
//! The layout loop spends a fixed budget of placement attempts. A candidate
//! room that would overlap (or touch) an accepted room is skipped, not
//! retried, so floors vary in room count. Every accepted room is connected
//! to the previous one with an L-shaped corridor.

use crate::game::entities::Enemy;
use crate::game::world::{ConsumableEffect, GameMap, GroundItem, ItemKind, Npc, TileKind};
use crate::game::{new_entity_id, Position};
use crate::generation::themes::{self, enemy_spec, item_spec, job_theme_for_floor, JobTheme};
use crate::generation::{utils, GenerationConfig, Generator, Room};
use crate::utils::{scale_by_floor, scale_money};
use crate::{config, ShiftError, ShiftResult};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

/// Primary floor generator using a room-and-corridor algorithm.
///
/// This generator creates floors by:
/// 1. Placing rooms randomly with collision rejection
/// 2. Connecting consecutive rooms with L-shaped corridors
/// 3. Placing stairs in the first and last rooms
/// 4. Populating the floor from the job theme's content pools
#[derive(Debug, Clone, Default)]
pub struct FloorGenerator;

impl FloorGenerator {
    /// Creates a new floor generator.
    pub fn new() -> Self {
        Self
    }

    /// Places rooms within the attempt budget. Accepted rooms are carved
    /// immediately and linked to the previously accepted room.
    fn place_rooms(&self, map: &mut GameMap, config: &GenerationConfig, rng: &mut StdRng) {
        for _ in 0..config.room_attempts {
            let width = rng.gen_range(config.min_room_size..=config.max_room_size) as i32;
            let height = rng.gen_range(config.min_room_size..=config.max_room_size) as i32;

            let max_x = config.width as i32 - width - 1;
            let max_y = config.height as i32 - height - 1;
            if max_x < 1 || max_y < 1 {
                continue;
            }

            let x = rng.gen_range(1..=max_x);
            let y = rng.gen_range(1..=max_y);
            let candidate = Room::new(x, y, width, height);

            let collides = map
                .rooms
                .iter()
                .any(|room| room.inflated(1).intersects(&candidate.inflated(1)));
            if collides {
                continue;
            }

            self.carve_room(map, &candidate);

            if let Some(previous) = map.rooms.last().copied() {
                let horizontal_first = rng.gen_bool(0.5);
                self.carve_corridor(map, previous.center(), candidate.center(), horizontal_first);
            }

            map.rooms.push(candidate);
        }
    }

    /// Carves a room's cells to floor.
    fn carve_room(&self, map: &mut GameMap, room: &Room) {
        for y in room.y..=room.bottom() {
            for x in room.x..=room.right() {
                map.set_tile(Position::new(x, y), TileKind::Floor);
            }
        }
    }

    /// Carves an L-shaped corridor between two points. The coin flip on
    /// leg order keeps corridors from all bending the same way.
    fn carve_corridor(&self, map: &mut GameMap, start: Position, end: Position, horizontal_first: bool) {
        if horizontal_first {
            self.carve_horizontal(map, start.x, end.x, start.y);
            self.carve_vertical(map, start.y, end.y, end.x);
        } else {
            self.carve_vertical(map, start.y, end.y, start.x);
            self.carve_horizontal(map, start.x, end.x, end.y);
        }
    }

    fn carve_horizontal(&self, map: &mut GameMap, x1: i32, x2: i32, y: i32) {
        for x in x1.min(x2)..=x1.max(x2) {
            map.set_tile(Position::new(x, y), TileKind::Floor);
        }
    }

    fn carve_vertical(&self, map: &mut GameMap, y1: i32, y2: i32, x: i32) {
        for y in y1.min(y2)..=y1.max(y2) {
            map.set_tile(Position::new(x, y), TileKind::Floor);
        }
    }

    /// Places stairs at the first and last room centers. A degenerate
    /// floor with fewer than two rooms gets no stairs at all; the engine
    /// treats stair interactions as unavailable there. Floor 1 never has a
    /// way back up.
    fn place_stairs(&self, map: &mut GameMap, floor: u32) {
        if map.rooms.len() < 2 {
            return;
        }

        let first = map.rooms[0];
        let last = map.rooms[map.rooms.len() - 1];

        if floor > 1 {
            let up = first.center();
            map.set_tile(up, TileKind::StairsUp);
            map.stairs_up = Some(up);
        }

        let down = last.center();
        map.set_tile(down, TileKind::StairsDown);
        map.stairs_down = Some(down);
    }

    /// Spawns enemies from the theme pool, augmented with universal
    /// hazards that unlock as the player descends. Collisions are skipped
    /// silently; the count is a budget, not a guarantee.
    fn spawn_enemies(&self, map: &mut GameMap, floor: u32, theme: &JobTheme, rng: &mut StdRng) {
        let mut pool: Vec<&str> = theme.enemies.to_vec();
        if floor >= 2 {
            pool.push("debt_collector");
        }
        if floor >= 3 {
            pool.push("lawyer");
        }
        if floor >= config::BOSS_FLOOR_INTERVAL && floor % config::BOSS_FLOOR_INTERVAL == 0 {
            pool.push("the_ex");
        }

        let count = config::ENEMIES_PER_FLOOR + (floor / 2) as usize;
        for _ in 0..count {
            // The first room is the player spawn; keep it clear.
            if map.rooms.len() <= 1 {
                continue;
            }
            let room = map.rooms[rng.gen_range(1..map.rooms.len())];
            let cell = room.random_interior_cell(rng);
            if !map.is_walkable(cell) || map.enemy_at(cell).is_some() {
                continue;
            }

            let key = pool[rng.gen_range(0..pool.len())];
            let Some(spec) = enemy_spec(key) else {
                continue;
            };

            let mut enemy = Enemy::new(
                cell,
                spec.name,
                spec.glyph,
                scale_by_floor(spec.health, floor),
                scale_by_floor(spec.attack, floor),
                spec.defense,
            );
            enemy.exp_value = spec.exp_value;
            enemy.money_drop = [
                (spec.money_drop[0] as f64 * theme.money_multiplier).floor() as i64,
                (spec.money_drop[1] as f64 * theme.money_multiplier).floor() as i64,
            ];
            enemy.is_boss = spec.is_boss;
            map.enemies.push(enemy);
        }
    }

    /// Spawns money piles and themed items, both with the same
    /// skip-on-collision rule as enemies.
    fn spawn_items(&self, map: &mut GameMap, floor: u32, theme: &JobTheme, rng: &mut StdRng) {
        let money_count = config::MONEY_PER_FLOOR + floor as usize;
        for _ in 0..money_count {
            self.spawn_money_item(map, floor, theme, rng);
        }

        for _ in 0..config::ITEMS_PER_FLOOR {
            let key = theme.items[rng.gen_range(0..theme.items.len())];
            self.spawn_themed_item(map, key, floor, theme, rng);
        }
    }

    fn spawn_money_item(&self, map: &mut GameMap, floor: u32, theme: &JobTheme, rng: &mut StdRng) {
        let Some(cell) = self.pick_item_cell(map, rng) else {
            return;
        };

        let subtype = themes::MONEY_SUBTYPES[rng.gen_range(0..themes::MONEY_SUBTYPES.len())];
        let Some(spec) = item_spec(subtype) else {
            return;
        };
        let themes::ItemSpecKind::MoneyRange(range) = spec.kind else {
            return;
        };

        let base = if range[1] > range[0] {
            rng.gen_range(range[0]..=range[1])
        } else {
            range[0]
        };
        let value = scale_money(base, theme.money_multiplier, floor);

        map.items.push(GroundItem {
            pos: cell,
            glyph: spec.glyph,
            name: spec.name.to_string(),
            kind: ItemKind::Money(value),
            description: spec.description.to_string(),
        });
    }

    fn spawn_themed_item(
        &self,
        map: &mut GameMap,
        key: &str,
        floor: u32,
        theme: &JobTheme,
        rng: &mut StdRng,
    ) {
        let Some(cell) = self.pick_item_cell(map, rng) else {
            return;
        };
        let Some(spec) = item_spec(key) else {
            return;
        };

        let kind = match spec.kind {
            themes::ItemSpecKind::Consumable { heal } => ItemKind::Consumable {
                effect: ConsumableEffect::Heal,
                amount: heal,
            },
            themes::ItemSpecKind::Weapon(range) => {
                ItemKind::Weapon(utils::roll_range(rng, range) + (floor / 2) as i32)
            }
            themes::ItemSpecKind::Armor(range) => {
                ItemKind::Armor(utils::roll_range(rng, range) + (floor / 2) as i32)
            }
            themes::ItemSpecKind::MoneyRange(range) => {
                let base = if range[1] > range[0] {
                    rng.gen_range(range[0]..=range[1])
                } else {
                    range[0]
                };
                ItemKind::Money(scale_money(base, theme.money_multiplier, floor))
            }
        };

        map.items.push(GroundItem {
            pos: cell,
            glyph: spec.glyph,
            name: spec.name.to_string(),
            kind,
            description: spec.description.to_string(),
        });
    }

    /// Picks a free interior cell in a random room, or None when the draw
    /// collides (the spawn is skipped, never retried).
    fn pick_item_cell(&self, map: &GameMap, rng: &mut StdRng) -> Option<Position> {
        if map.rooms.is_empty() {
            return None;
        }
        let room = map.rooms[rng.gen_range(0..map.rooms.len())];
        let cell = room.random_interior_cell(rng);
        if map.is_walkable(cell) && map.item_at(cell).is_none() {
            Some(cell)
        } else {
            None
        }
    }

    /// Spawns at most one NPC per floor, in a room that is neither the
    /// player-spawn room nor the stairs-down room.
    fn spawn_npc(&self, map: &mut GameMap, rng: &mut StdRng) {
        if rng.gen::<f64>() > 0.3 {
            return;
        }
        if map.rooms.len() <= 2 {
            return;
        }

        let middle = &map.rooms[1..map.rooms.len() - 1];
        let room = middle[rng.gen_range(0..middle.len())];
        let cell = room.center();

        if !map.is_walkable(cell) || map.enemy_at(cell).is_some() || map.npc_at(cell).is_some() {
            return;
        }

        let spec = themes::NPC_SPECS[rng.gen_range(0..themes::NPC_SPECS.len())];
        map.npcs.push(Npc {
            id: new_entity_id(),
            pos: cell,
            glyph: spec.glyph,
            name: spec.name.to_string(),
            dialogue: spec.dialogue.iter().map(|line| line.to_string()).collect(),
            money_gift: spec.money_gift,
            item_gift: spec.item_gift.map(String::from),
            spoken: false,
        });
    }
}

impl Generator<GameMap> for FloorGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> ShiftResult<GameMap> {
        let theme = job_theme_for_floor(config.floor);
        let mut map = GameMap::new(config.width, config.height);
        map.theme_index =
            (config.floor.saturating_sub(1) as usize) % themes::JOB_THEMES.len();

        self.place_rooms(&mut map, config, rng);
        self.place_stairs(&mut map, config.floor);
        self.spawn_enemies(&mut map, config.floor, theme, rng);
        self.spawn_items(&mut map, config.floor, theme, rng);
        self.spawn_npc(&mut map, rng);

        debug!(
            "generated floor {} ({}): {} rooms, {} enemies, {} items, {} npcs",
            config.floor,
            theme.name,
            map.rooms.len(),
            map.enemies.len(),
            map.items.len(),
            map.npcs.len()
        );

        self.validate(&map, config)?;
        Ok(map)
    }

    fn validate(&self, map: &GameMap, config: &GenerationConfig) -> ShiftResult<()> {
        // Accepted rooms must never overlap or touch.
        for (i, left) in map.rooms.iter().enumerate() {
            for right in &map.rooms[i + 1..] {
                if left.inflated(1).intersects(&right.inflated(1)) {
                    return Err(ShiftError::GenerationFailed(format!(
                        "rooms overlap: {:?} vs {:?}",
                        left, right
                    )));
                }
            }
        }

        if map.rooms.len() >= 2 {
            if map.stairs_down.is_none() {
                return Err(ShiftError::GenerationFailed(
                    "multi-room floor is missing its down staircase".to_string(),
                ));
            }
            if config.floor == 1 && map.stairs_up.is_some() {
                return Err(ShiftError::GenerationFailed(
                    "floor 1 must not have an up staircase".to_string(),
                ));
            }
            if config.floor > 1 && map.stairs_up.is_none() {
                return Err(ShiftError::GenerationFailed(
                    "deep floor is missing its up staircase".to_string(),
                ));
            }
        }

        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "FloorGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::utils::create_rng;

    fn generate(seed: u64, floor: u32) -> GameMap {
        let config = GenerationConfig::new(seed, floor);
        let mut rng = create_rng(&config);
        FloorGenerator::new().generate(&config, &mut rng).expect("generation succeeds")
    }

    #[test]
    fn test_floor_one_has_no_up_stairs() {
        for seed in 0..20 {
            let map = generate(seed, 1);
            assert!(map.stairs_up.is_none(), "seed {} placed up stairs on floor 1", seed);
        }
    }

    #[test]
    fn test_deeper_floors_have_both_stairs() {
        for seed in 0..20 {
            let map = generate(seed, 2);
            if map.rooms.len() >= 2 {
                assert!(map.stairs_up.is_some());
                assert!(map.stairs_down.is_some());
            }
        }
    }

    #[test]
    fn test_same_seed_same_floor() {
        let first = generate(777, 3);
        let second = generate(777, 3);

        assert_eq!(first.rooms, second.rooms);
        assert_eq!(first.stairs_down, second.stairs_down);
        assert_eq!(first.stairs_up, second.stairs_up);
        assert_eq!(first.enemies.len(), second.enemies.len());
        for (a, b) in first.enemies.iter().zip(second.enemies.iter()) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.name, b.name);
            assert_eq!(a.health, b.health);
        }
        for (a, b) in first.items.iter().zip(second.items.iter()) {
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.kind, b.kind);
        }
    }

    #[test]
    fn test_no_enemies_in_spawn_room() {
        for seed in 0..20 {
            let map = generate(seed, 4);
            if let Some(first_room) = map.rooms.first() {
                for enemy in &map.enemies {
                    assert!(
                        !first_room.contains(enemy.pos),
                        "seed {} spawned {} in the player-spawn room",
                        seed,
                        enemy.name
                    );
                }
            }
        }
    }

    #[test]
    fn test_boss_only_on_interval_floors() {
        for seed in 0..10 {
            for floor in 1..=12 {
                let map = generate(seed, floor);
                let has_boss = map.enemies.iter().any(|e| e.is_boss);
                if floor % config::BOSS_FLOOR_INTERVAL != 0 {
                    assert!(!has_boss, "boss on floor {} (seed {})", floor, seed);
                }
            }
        }
    }

    #[test]
    fn test_enemy_stats_scale_with_floor() {
        // Same seed: floor 11 enemies of a given kind must not be weaker
        // than their floor 1 counterparts.
        let shallow = generate(5, 1);
        let deep = generate(5, 1 + themes::JOB_THEMES.len() as u32 * 2);

        for deep_enemy in &deep.enemies {
            if let Some(base) = shallow.enemies.iter().find(|e| e.name == deep_enemy.name) {
                assert!(deep_enemy.max_health >= base.max_health);
                assert!(deep_enemy.attack >= base.attack);
            }
        }
    }

    #[test]
    fn test_at_most_one_npc() {
        for seed in 0..30 {
            let map = generate(seed, 2);
            assert!(map.npcs.len() <= 1);
        }
    }
}
