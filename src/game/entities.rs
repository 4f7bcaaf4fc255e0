//! # Enemy Entities
//!
//! Workplace hazards that roam a shift floor. Enemies are owned by the
//! floor they spawn on and are dropped wholesale when the floor is
//! regenerated; nothing about them persists across floors.

use crate::config;
use crate::game::{new_entity_id, Direction, EntityId, Position};
use crate::utils::chase_step;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A hostile actor on the current floor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Unique identifier for this enemy
    pub id: EntityId,
    /// Current position on the floor
    pub pos: Position,
    /// Display glyph
    pub glyph: char,
    /// Display name
    pub name: String,
    /// Maximum health
    pub max_health: i32,
    /// Current health
    pub health: i32,
    /// Attack power
    pub attack: i32,
    /// Damage reduction
    pub defense: i32,
    /// Experience awarded on kill
    pub exp_value: i32,
    /// Inclusive money drop range, already scaled by the floor theme
    pub money_drop: [i64; 2],
    /// Whether this is the boss encounter
    pub is_boss: bool,
    /// A stunned enemy skips its next action
    pub stunned: bool,
}

impl Enemy {
    /// Creates an enemy at the given position with the given combat stats.
    pub fn new(
        pos: Position,
        name: &str,
        glyph: char,
        max_health: i32,
        attack: i32,
        defense: i32,
    ) -> Self {
        Self {
            id: new_entity_id(),
            pos,
            glyph,
            name: name.to_string(),
            max_health,
            health: max_health,
            attack,
            defense,
            exp_value: 0,
            money_drop: [0, 0],
            is_boss: false,
            stunned: false,
        }
    }

    /// Checks whether the enemy is still alive.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Applies damage reduced by defense, with a floor of 1.
    ///
    /// Returns the damage actually dealt.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let actual = (amount - self.defense).max(1);
        self.health -= actual;
        actual
    }

    /// Rolls a money drop within this enemy's range.
    pub fn roll_money_drop(&self, rng: &mut StdRng) -> i64 {
        if self.money_drop[1] <= self.money_drop[0] {
            return self.money_drop[0];
        }
        rng.gen_range(self.money_drop[0]..=self.money_drop[1])
    }
}

/// What an enemy wants to do with its action this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyAction {
    /// Strike the adjacent player; the engine resolves the damage
    Attack,
    /// Step onto the given position
    Step(Position),
    /// Stay in place
    Wait,
}

/// Decides an enemy's action for this turn.
///
/// Adjacent to the player it attacks; within the chase radius it takes one
/// greedy step toward the player; otherwise it wanders one random cardinal
/// step. `is_open` reports whether a destination cell is walkable and
/// unoccupied. Stun and death gating happen in the engine before this is
/// called.
pub fn decide(
    enemy: &Enemy,
    player: Position,
    rng: &mut StdRng,
    is_open: impl Fn(Position) -> bool,
) -> EnemyAction {
    let dist = enemy.pos.manhattan_distance(player);

    if dist <= 1 {
        return EnemyAction::Attack;
    }

    if dist <= config::CHASE_RADIUS {
        let delta = chase_step(enemy.pos, player, is_open);
        if delta == Position::new(0, 0) {
            return EnemyAction::Wait;
        }
        return EnemyAction::Step(enemy.pos + delta);
    }

    // Out of range: wander one random cardinal step.
    let directions = Direction::all();
    let direction = directions[rng.gen_range(0..directions.len())];
    let dest = enemy.pos.step(direction);
    if is_open(dest) {
        EnemyAction::Step(dest)
    } else {
        EnemyAction::Wait
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn enemy_at(x: i32, y: i32) -> Enemy {
        Enemy::new(Position::new(x, y), "Angry Customer", 'C', 20, 6, 2)
    }

    #[test]
    fn test_take_damage_has_floor_of_one() {
        let mut enemy = enemy_at(0, 0);
        // Attack weaker than defense still chips one point.
        assert_eq!(enemy.take_damage(1), 1);
        assert_eq!(enemy.health, 19);
        assert_eq!(enemy.take_damage(10), 8);
        assert_eq!(enemy.health, 11);
    }

    #[test]
    fn test_dead_below_or_at_zero() {
        let mut enemy = enemy_at(0, 0);
        enemy.health = 3;
        enemy.take_damage(50);
        assert!(!enemy.is_alive());
    }

    #[test]
    fn test_adjacent_enemy_attacks() {
        let mut rng = StdRng::seed_from_u64(7);
        let enemy = enemy_at(5, 5);
        let action = decide(&enemy, Position::new(5, 6), &mut rng, |_| true);
        assert_eq!(action, EnemyAction::Attack);
    }

    #[test]
    fn test_nearby_enemy_closes_distance() {
        let mut rng = StdRng::seed_from_u64(7);
        let enemy = enemy_at(5, 5);
        let player = Position::new(9, 5);
        match decide(&enemy, player, &mut rng, |_| true) {
            EnemyAction::Step(dest) => {
                assert!(dest.manhattan_distance(player) < enemy.pos.manhattan_distance(player));
            }
            other => panic!("expected a chase step, got {:?}", other),
        }
    }

    #[test]
    fn test_distant_enemy_takes_cardinal_step_or_waits() {
        let mut rng = StdRng::seed_from_u64(99);
        let enemy = enemy_at(5, 5);
        let player = Position::new(40, 20);
        for _ in 0..50 {
            match decide(&enemy, player, &mut rng, |p| p.x % 2 == 0) {
                EnemyAction::Step(dest) => {
                    assert_eq!(enemy.pos.manhattan_distance(dest), 1);
                    assert_eq!(dest.x % 2, 0);
                }
                EnemyAction::Wait => {}
                EnemyAction::Attack => panic!("enemy attacked from far away"),
            }
        }
    }

    #[test]
    fn test_blocked_chase_waits() {
        let mut rng = StdRng::seed_from_u64(7);
        let enemy = enemy_at(5, 5);
        let action = decide(&enemy, Position::new(8, 7), &mut rng, |_| false);
        assert_eq!(action, EnemyAction::Wait);
    }

    #[test]
    fn test_money_drop_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut enemy = enemy_at(0, 0);
        enemy.money_drop = [10, 30];
        for _ in 0..20 {
            let drop = enemy.roll_money_drop(&mut rng);
            assert!((10..=30).contains(&drop));
        }
    }
}
