//! # Player Character
//!
//! The single player character: stats, equipment, inventory, leveling, and
//! the money ledger. The player is owned by the game session and persists
//! across floor transitions, unlike everything else on a floor.

use crate::config;
use crate::game::world::{ConsumableEffect, GameMap, ItemKind, TileKind};
use crate::game::{EntityId, Position};
use serde::{Deserialize, Serialize};

/// An item held in the inventory or an equipment slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarriedItem {
    pub name: String,
    pub kind: ItemKind,
}

/// Result of a movement attempt. Movement doubles as the interaction verb:
/// bumping an enemy attacks it and stepping onto an item picks it up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Bumped into a living enemy; the player did not move
    Combat(EntityId),
    /// Moved onto a cell holding an item
    Item,
    /// Moved onto the down staircase
    StairsDown,
    /// Moved onto the up staircase
    StairsUp,
    /// Plain successful move
    Moved,
    /// Target cell is a wall; no turn should be consumed
    Blocked,
}

/// The player character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Position,
    pub max_health: i32,
    pub health: i32,
    pub base_attack: i32,
    pub defense: i32,
    pub money: i64,
    pub level: u32,
    pub exp: i32,
    pub exp_to_level: i32,
    pub weapon: Option<CarriedItem>,
    pub armor: Option<CarriedItem>,
    pub inventory: Vec<CarriedItem>,
    /// All money ever earned; never decreases
    pub total_money_earned: i64,
    /// All alimony ever paid
    pub total_alimony_paid: i64,
    pub enemies_killed: u32,
    /// Highest floor reached
    pub floors_explored: u32,
    pub name: String,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    /// Creates a player with the default starting stats.
    pub fn new() -> Self {
        Self {
            pos: Position::new(0, 0),
            max_health: config::STARTING_HEALTH,
            health: config::STARTING_HEALTH,
            base_attack: config::STARTING_ATTACK,
            defense: config::STARTING_DEFENSE,
            money: config::STARTING_MONEY,
            level: 1,
            exp: 0,
            exp_to_level: config::STARTING_EXP_TO_LEVEL,
            weapon: None,
            armor: None,
            inventory: Vec::new(),
            total_money_earned: 0,
            total_alimony_paid: 0,
            enemies_killed: 0,
            floors_explored: 0,
            name: "Dad".to_string(),
        }
    }

    /// Moves the player to an absolute position (floor transitions).
    pub fn set_position(&mut self, pos: Position) {
        self.pos = pos;
    }

    /// Checks whether the player is still standing.
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Applies damage reduced by total defense, with a floor of 1: a hit
    /// that lands is never a no-op.
    ///
    /// Returns the damage actually dealt.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let total_defense = self.defense + self.armor_bonus();
        let actual = (amount - total_defense).max(1);
        self.health -= actual;
        actual
    }

    /// Heals up to max health.
    pub fn heal(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Total attack power: base attack plus the equipped weapon bonus.
    pub fn attack_power(&self) -> i32 {
        self.base_attack + self.weapon_bonus()
    }

    /// Bonus from the equipped weapon, zero if none.
    pub fn weapon_bonus(&self) -> i32 {
        match &self.weapon {
            Some(CarriedItem { kind: ItemKind::Weapon(bonus), .. }) => *bonus,
            _ => 0,
        }
    }

    /// Bonus from the equipped armor, zero if none.
    pub fn armor_bonus(&self) -> i32 {
        match &self.armor {
            Some(CarriedItem { kind: ItemKind::Armor(bonus), .. }) => *bonus,
            _ => 0,
        }
    }

    /// Adds money to the wallet and the lifetime counter.
    pub fn add_money(&mut self, amount: i64) {
        self.money += amount;
        self.total_money_earned += amount;
    }

    /// Spends money if the wallet covers it.
    ///
    /// Returns false without mutating anything when funds are short;
    /// callers decide what an unpaid bill costs.
    pub fn spend_money(&mut self, amount: i64) -> bool {
        if self.money >= amount {
            self.money -= amount;
            true
        } else {
            false
        }
    }

    /// Awards experience and resolves any level-ups.
    ///
    /// A large award can trigger several level-ups in a row. Each level
    /// grants +10 max health (with a matching heal), +2 attack, +1 defense,
    /// and raises the next threshold by half.
    ///
    /// Returns true if at least one level-up occurred.
    pub fn add_exp(&mut self, amount: i32) -> bool {
        self.exp += amount;
        let mut leveled_up = false;

        while self.exp >= self.exp_to_level {
            self.exp -= self.exp_to_level;
            self.level += 1;
            self.exp_to_level = self.exp_to_level * 3 / 2;

            self.max_health += 10;
            self.health = (self.health + 10).min(self.max_health);
            self.base_attack += 2;
            self.defense += 1;

            leveled_up = true;
        }

        leveled_up
    }

    /// Equips a weapon, displacing the current one into the inventory.
    ///
    /// Displacement bypasses the inventory cap so equipment is never lost.
    pub fn equip_weapon(&mut self, item: CarriedItem) {
        if let Some(old) = self.weapon.take() {
            self.inventory.push(old);
        }
        self.weapon = Some(item);
    }

    /// Equips armor, displacing the current piece into the inventory.
    pub fn equip_armor(&mut self, item: CarriedItem) {
        if let Some(old) = self.armor.take() {
            self.inventory.push(old);
        }
        self.armor = Some(item);
    }

    /// Adds an item to the inventory.
    ///
    /// Returns the item back to the caller when the inventory is full, so
    /// nothing is silently dropped.
    pub fn add_to_inventory(&mut self, item: CarriedItem) -> Result<(), CarriedItem> {
        if self.inventory.len() < config::MAX_INVENTORY {
            self.inventory.push(item);
            Ok(())
        } else {
            Err(item)
        }
    }

    /// Uses an inventory item by index: consumables apply and vanish,
    /// equipment is equipped (displacing the current piece back into the
    /// inventory).
    ///
    /// Returns a message describing what happened, or None for an invalid
    /// index or an unusable item.
    pub fn use_inventory_item(&mut self, index: usize) -> Option<String> {
        if index >= self.inventory.len() {
            return None;
        }

        match self.inventory[index].kind {
            ItemKind::Consumable { effect: ConsumableEffect::Heal, amount } => {
                let item = self.inventory.remove(index);
                self.heal(amount);
                Some(format!("Used {}. Healed {} HP.", item.name, amount))
            }
            ItemKind::Weapon(bonus) => {
                let item = self.inventory.remove(index);
                let name = item.name.clone();
                self.equip_weapon(item);
                Some(format!("Equipped {}. Attack +{}.", name, bonus))
            }
            ItemKind::Armor(bonus) => {
                let item = self.inventory.remove(index);
                let name = item.name.clone();
                self.equip_armor(item);
                Some(format!("Equipped {}. Defense +{}.", name, bonus))
            }
            ItemKind::Money(_) => None,
        }
    }

    /// Attempts to move one step. Collision resolution happens here;
    /// consequences (combat damage, pickups, stair prompts) are resolved by
    /// the engine based on the returned outcome.
    pub fn try_move(&mut self, dx: i32, dy: i32, map: &GameMap) -> MoveOutcome {
        let target = Position::new(self.pos.x + dx, self.pos.y + dy);

        // Bump-to-attack: a living enemy on the target cell means combat,
        // and the player stays put.
        if let Some(enemy) = map.enemy_at(target) {
            return MoveOutcome::Combat(enemy.id);
        }

        if !map.is_walkable(target) {
            return MoveOutcome::Blocked;
        }

        self.pos = target;

        if map.item_at(target).is_some() {
            return MoveOutcome::Item;
        }

        match map.tile_at(target) {
            TileKind::StairsDown => MoveOutcome::StairsDown,
            TileKind::StairsUp => MoveOutcome::StairsUp,
            _ => MoveOutcome::Moved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::Enemy;
    use crate::game::world::GroundItem;

    fn open_map() -> GameMap {
        let mut map = GameMap::new(10, 10);
        for y in 1..9 {
            for x in 1..9 {
                map.set_tile(Position::new(x, y), TileKind::Floor);
            }
        }
        map
    }

    #[test]
    fn test_damage_floor_of_one() {
        let mut player = Player::new();
        player.defense = 50;
        let dealt = player.take_damage(10);
        assert_eq!(dealt, 1);
        assert_eq!(player.health, config::STARTING_HEALTH - 1);
    }

    #[test]
    fn test_armor_reduces_damage() {
        let mut player = Player::new();
        player.equip_armor(CarriedItem {
            name: "Work Uniform".to_string(),
            kind: ItemKind::Armor(3),
        });
        let dealt = player.take_damage(20);
        assert_eq!(dealt, 20 - config::STARTING_DEFENSE - 3);
    }

    #[test]
    fn test_money_round_trip_keeps_lifetime_counter() {
        let mut player = Player::new();
        player.add_money(250);
        assert!(player.spend_money(250));
        assert_eq!(player.money, config::STARTING_MONEY);
        assert_eq!(player.total_money_earned, 250);

        // Spending again fails and mutates nothing.
        assert!(!player.spend_money(1));
        assert_eq!(player.total_money_earned, 250);
    }

    #[test]
    fn test_exact_exp_award_levels_once() {
        let mut player = Player::new();
        let before_attack = player.base_attack;
        let before_max = player.max_health;

        assert!(player.add_exp(config::STARTING_EXP_TO_LEVEL));
        assert_eq!(player.level, 2);
        assert_eq!(player.exp, 0);
        assert_eq!(player.exp_to_level, config::STARTING_EXP_TO_LEVEL * 3 / 2);
        assert_eq!(player.base_attack, before_attack + 2);
        assert_eq!(player.max_health, before_max + 10);
        assert_eq!(player.defense, config::STARTING_DEFENSE + 1);
    }

    #[test]
    fn test_large_exp_award_levels_multiple_times() {
        let mut player = Player::new();
        // 50 + 75 = 125 gets exactly two levels.
        assert!(player.add_exp(125));
        assert_eq!(player.level, 3);
        assert_eq!(player.exp, 0);
    }

    #[test]
    fn test_equip_displaces_into_inventory() {
        let mut player = Player::new();
        player.equip_weapon(CarriedItem {
            name: "Spatula".to_string(),
            kind: ItemKind::Weapon(3),
        });
        player.equip_weapon(CarriedItem {
            name: "Box Cutter".to_string(),
            kind: ItemKind::Weapon(5),
        });

        assert_eq!(player.weapon_bonus(), 5);
        assert_eq!(player.inventory.len(), 1);
        assert_eq!(player.inventory[0].name, "Spatula");
    }

    #[test]
    fn test_inventory_cap_reports_failure_without_losing_item() {
        let mut player = Player::new();
        for i in 0..config::MAX_INVENTORY {
            let added = player.add_to_inventory(CarriedItem {
                name: format!("Snack {}", i),
                kind: ItemKind::Consumable { effect: ConsumableEffect::Heal, amount: 5 },
            });
            assert!(added.is_ok());
        }

        let extra = CarriedItem {
            name: "One Too Many".to_string(),
            kind: ItemKind::Consumable { effect: ConsumableEffect::Heal, amount: 5 },
        };
        let rejected = player.add_to_inventory(extra).unwrap_err();
        assert_eq!(rejected.name, "One Too Many");
        assert_eq!(player.inventory.len(), config::MAX_INVENTORY);
    }

    #[test]
    fn test_use_consumable_heals_and_vanishes() {
        let mut player = Player::new();
        player.health = 50;
        player
            .add_to_inventory(CarriedItem {
                name: "Energy Drink".to_string(),
                kind: ItemKind::Consumable { effect: ConsumableEffect::Heal, amount: 25 },
            })
            .unwrap();

        let msg = player.use_inventory_item(0).expect("usable item");
        assert!(msg.contains("Energy Drink"));
        assert_eq!(player.health, 75);
        assert!(player.inventory.is_empty());
        assert!(player.use_inventory_item(0).is_none());
    }

    #[test]
    fn test_move_into_wall_is_blocked() {
        let mut player = Player::new();
        let map = open_map();
        player.set_position(Position::new(1, 1));
        assert_eq!(player.try_move(-1, 0, &map), MoveOutcome::Blocked);
        assert_eq!(player.pos, Position::new(1, 1));
    }

    #[test]
    fn test_bump_into_enemy_yields_combat_without_moving() {
        let mut player = Player::new();
        let mut map = open_map();
        let enemy = Enemy::new(Position::new(3, 2), "Sewer Rat", 'r', 10, 3, 1);
        let enemy_id = enemy.id;
        map.enemies.push(enemy);

        player.set_position(Position::new(2, 2));
        assert_eq!(player.try_move(1, 0, &map), MoveOutcome::Combat(enemy_id));
        assert_eq!(player.pos, Position::new(2, 2));
    }

    #[test]
    fn test_step_onto_item_and_stairs() {
        let mut player = Player::new();
        let mut map = open_map();
        map.items.push(GroundItem {
            pos: Position::new(3, 3),
            glyph: '$',
            name: "Loose Cash".to_string(),
            kind: ItemKind::Money(10),
            description: String::new(),
        });
        map.set_tile(Position::new(4, 4), TileKind::StairsDown);

        player.set_position(Position::new(3, 2));
        assert_eq!(player.try_move(0, 1, &map), MoveOutcome::Item);

        player.set_position(Position::new(4, 3));
        assert_eq!(player.try_move(0, 1, &map), MoveOutcome::StairsDown);
    }
}
