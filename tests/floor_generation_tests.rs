//! Integration tests for floor generation: room invariants, corridor
//! connectivity, stair placement, and themed population rules.

use gigshift::generation::utils::create_rng;
use gigshift::{
    config, FloorGenerator, GameMap, GenerationConfig, Generator, Position, TileKind,
};
use proptest::prelude::*;
use std::collections::{HashSet, VecDeque};

fn generate(seed: u64, floor: u32) -> GameMap {
    let gen_config = GenerationConfig::new(seed, floor);
    let mut rng = create_rng(&gen_config);
    FloorGenerator::new()
        .generate(&gen_config, &mut rng)
        .expect("generation succeeds")
}

/// Flood fill over walkable tiles from a starting cell.
fn reachable_from(map: &GameMap, start: Position) -> HashSet<Position> {
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(pos) = queue.pop_front() {
        for next in pos.cardinal_adjacent_positions() {
            if map.is_walkable(next) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    visited
}

#[test]
fn every_room_center_is_reachable_from_the_spawn() {
    for seed in 0..50 {
        let map = generate(seed, 1);
        if map.rooms.is_empty() {
            continue;
        }

        let reachable = reachable_from(&map, map.player_start_position());
        for room in &map.rooms {
            assert!(
                reachable.contains(&room.center()),
                "seed {}: room center {:?} unreachable from spawn",
                seed,
                room.center()
            );
        }
    }
}

#[test]
fn stairs_are_reachable_and_correctly_placed() {
    for seed in 0..50 {
        let map = generate(seed, 3);
        if map.rooms.len() < 2 {
            assert!(map.stairs_down.is_none());
            assert!(map.stairs_up.is_none());
            continue;
        }

        let down = map.stairs_down.expect("stairs down on multi-room floor");
        let up = map.stairs_up.expect("stairs up above floor 1");
        assert_eq!(map.tile_at(down), TileKind::StairsDown);
        assert_eq!(map.tile_at(up), TileKind::StairsUp);
        assert_eq!(up, map.rooms[0].center());
        assert_eq!(down, map.rooms[map.rooms.len() - 1].center());

        let reachable = reachable_from(&map, map.player_start_position());
        assert!(reachable.contains(&down), "seed {}: stairs down unreachable", seed);
    }
}

#[test]
fn floor_one_never_has_an_up_staircase() {
    for seed in 0..100 {
        let map = generate(seed, 1);
        assert!(map.stairs_up.is_none(), "seed {} broke the no-way-back rule", seed);
    }
}

#[test]
fn borders_stay_walled() {
    for seed in 0..20 {
        let map = generate(seed, 2);
        for x in 0..map.width as i32 {
            assert_eq!(map.tile_at(Position::new(x, 0)), TileKind::Wall);
            assert_eq!(map.tile_at(Position::new(x, map.height as i32 - 1)), TileKind::Wall);
        }
        for y in 0..map.height as i32 {
            assert_eq!(map.tile_at(Position::new(0, y)), TileKind::Wall);
            assert_eq!(map.tile_at(Position::new(map.width as i32 - 1, y)), TileKind::Wall);
        }
    }
}

#[test]
fn spawned_content_never_stacks() {
    for seed in 0..50 {
        let map = generate(seed, 5);

        let mut enemy_cells = HashSet::new();
        for enemy in &map.enemies {
            assert!(
                enemy_cells.insert(enemy.pos),
                "seed {}: two enemies share {:?}",
                seed,
                enemy.pos
            );
            assert!(map.is_walkable(enemy.pos));
        }

        let mut item_cells = HashSet::new();
        for item in &map.items {
            assert!(
                item_cells.insert(item.pos),
                "seed {}: two items share {:?}",
                seed,
                item.pos
            );
            assert!(map.is_walkable(item.pos));
        }
    }
}

#[test]
fn enemy_count_respects_the_budget() {
    for seed in 0..20 {
        for floor in [1, 4, 9] {
            let map = generate(seed, floor);
            let budget = config::ENEMIES_PER_FLOOR + (floor / 2) as usize;
            assert!(
                map.enemies.len() <= budget,
                "seed {} floor {}: {} enemies over budget {}",
                seed,
                floor,
                map.enemies.len(),
                budget
            );
        }
    }
}

#[test]
fn npc_spawns_only_in_middle_rooms() {
    for seed in 0..60 {
        let map = generate(seed, 2);
        for npc in &map.npcs {
            let first = map.rooms.first().expect("npc floor has rooms");
            let last = map.rooms.last().expect("npc floor has rooms");
            assert!(!first.contains(npc.pos), "seed {}: NPC in spawn room", seed);
            assert!(!last.contains(npc.pos), "seed {}: NPC in stairs room", seed);
            assert!(!npc.spoken);
        }
    }
}

#[test]
fn generator_reports_its_type() {
    assert_eq!(FloorGenerator::new().generator_type(), "FloorGenerator");
}

#[test]
fn testing_config_generates_on_a_small_grid() {
    let gen_config = GenerationConfig::for_testing(99, 2);
    let mut rng = create_rng(&gen_config);
    let map = FloorGenerator::new()
        .generate(&gen_config, &mut rng)
        .expect("small grids generate too");

    assert_eq!(map.width, gen_config.width);
    assert_eq!(map.height, gen_config.height);
    for room in &map.rooms {
        assert!(room.right() < map.width as i32 - 1);
        assert!(room.bottom() < map.height as i32 - 1);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Accepted room pairs never intersect, even inflated by the one-cell
    /// buffer, across arbitrary seeds and floors.
    #[test]
    fn prop_rooms_never_touch(seed in any::<u64>(), floor in 1u32..30) {
        let map = generate(seed, floor);
        for (i, left) in map.rooms.iter().enumerate() {
            for right in &map.rooms[i + 1..] {
                prop_assert!(
                    !left.inflated(1).intersects(&right.inflated(1)),
                    "rooms touch: {:?} vs {:?}", left, right
                );
            }
        }
    }

    /// The validation pass agrees with whatever the generator produced.
    #[test]
    fn prop_generated_floors_validate(seed in any::<u64>(), floor in 1u32..30) {
        let gen_config = GenerationConfig::new(seed, floor);
        let mut rng = create_rng(&gen_config);
        let generator = FloorGenerator::new();
        let map = generator.generate(&gen_config, &mut rng).expect("generation succeeds");
        prop_assert!(generator.validate(&map, &gen_config).is_ok());
    }
}
