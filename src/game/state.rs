//! # Game State Module
//!
//! Central session state and the turn engine. One `GameState` owns the
//! player, the current floor, the calendar, and the payment cycle, and is
//! the only writer of any of them: every mutation happens synchronously in
//! response to a single player intent.
//!
//! Within one turn the resolution order is fixed: visitation countdown,
//! then every enemy's action in list order (with a death check), then the
//! calendar tick, then the random life-event rolls. Front ends pull
//! rendering snapshots after the turn; nothing is pushed.

use crate::config;
use crate::game::entities::{self, EnemyAction};
use crate::game::events::{
    self, ChildEffect, LuckyBreakEffect, PositiveEffect,
};
use crate::game::player::{CarriedItem, MoveOutcome, Player};
use crate::game::world::{ConsumableEffect, GameMap, ItemKind, TileKind};
use crate::game::{EntityId, Occurrence, Position, StairDirection};
use crate::generation::themes::{self, item_spec, job_theme_for_floor, ItemSpecKind};
use crate::generation::{utils as genutils, FloorGenerator, GenerationConfig, Generator};
use crate::input::PlayerIntent;
use crate::utils::{format_message, format_money};
use crate::ShiftResult;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Messages with `{placeholder}` slots, substituted at log time.
const MSG_PAYMENT_SUCCESS: &str = "You made the alimony payment! Another month of freedom.";
const MSG_PAYMENT_FAILED: &str = "You couldn't make the payment. Your ex is not happy.";
const MSG_CHILD_BIRTHDAY: &str = "{child} has turned {age}. Time flies when you're working.";
const MSG_CHILD_ADULT: &str = "{child} has turned 18! You're finally free!";
const MSG_GAME_OVER_HEALTH: &str = "You collapsed from exhaustion. The payments stop with you.";
const MSG_GAME_OVER_JAIL: &str = "You were arrested for missing too many payments.";
const MSG_LEVEL_UP: &str = "You feel more experienced. Level {level}!";
const MSG_ENEMY_KILLED: &str = "You defeated the {enemy}! Found {money}.";
const MSG_PLAYER_HIT: &str = "The {enemy} hits you for {damage} damage!";
const MSG_ENEMY_HIT: &str = "You hit the {enemy} for {damage} damage!";

/// Log history kept in core; front ends apply their own display policy.
const MAX_LOG_MESSAGES: usize = 50;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Health reached zero
    Health,
    /// Three alimony payments missed in a row
    Jail,
    /// The child reached adulthood (or a lucky break got there early)
    Victory,
}

/// Session lifecycle. Once ended, no further intents are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    Ended(EndReason),
}

/// The job the player starts with. Works like an RPG class: each grants
/// flat starting bonuses, and fast food veterans squeeze 10% more money
/// out of everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartingJob {
    FastFood,
    Warehouse,
    Rideshare,
    Construction,
    SecurityGuard,
    CallCenter,
}

/// Flat stat adjustments a starting job grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobBonuses {
    pub health: i32,
    pub money: i64,
    pub attack: i32,
    pub defense: i32,
}

impl StartingJob {
    /// Display title for the job.
    pub fn title(self) -> &'static str {
        match self {
            StartingJob::FastFood => "Fast Food Worker",
            StartingJob::Warehouse => "Warehouse Worker",
            StartingJob::Rideshare => "Rideshare Driver",
            StartingJob::Construction => "Construction Worker",
            StartingJob::SecurityGuard => "Security Guard",
            StartingJob::CallCenter => "Call Center Rep",
        }
    }

    /// Starting stat bonuses for the job.
    pub fn bonuses(self) -> JobBonuses {
        match self {
            StartingJob::FastFood => JobBonuses { health: 0, money: 30, attack: 0, defense: 0 },
            StartingJob::Warehouse => JobBonuses { health: 20, money: 0, attack: 1, defense: 0 },
            StartingJob::Rideshare => JobBonuses { health: 0, money: 50, attack: 0, defense: 0 },
            StartingJob::Construction => {
                JobBonuses { health: 10, money: 20, attack: 2, defense: 1 }
            }
            StartingJob::SecurityGuard => {
                JobBonuses { health: 10, money: 10, attack: 0, defense: 2 }
            }
            StartingJob::CallCenter => JobBonuses { health: -10, money: 40, attack: 0, defense: 0 },
        }
    }

    /// Permanent money multiplier the job starts with.
    pub fn money_multiplier(self) -> f64 {
        match self {
            StartingJob::FastFood => 1.1,
            _ => 1.0,
        }
    }
}

/// Per-run options chosen before the first shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seed for the session RNG; the whole run replays from it
    pub seed: u64,
    pub player_name: String,
    pub child_name: String,
    pub starting_job: StartingJob,
}

impl SessionConfig {
    /// Creates a session config with default names and job.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            player_name: "Dad".to_string(),
            child_name: "Kid".to_string(),
            starting_job: StartingJob::FastFood,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Flat end-of-game record for a score keeper to rank and store. The core
/// emits this once and never reads it back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub player_name: String,
    pub child_name: String,
    pub years_worked: u32,
    pub final_child_age: u32,
    pub total_earned: i64,
    pub total_alimony_paid: i64,
    pub enemies_killed: u32,
    pub floors_explored: u32,
    pub final_level: u32,
    pub victory: bool,
}

/// One game session. Created at game start, mutated every turn, discarded
/// or reset on restart.
pub struct GameState {
    pub player: Player,
    pub map: GameMap,
    pub current_floor: u32,
    /// Global day counter; cooldowns and the visitation cadence key off it
    pub current_day: u32,
    pub current_month: u32,
    pub current_year: u32,
    pub days_until_payment: i32,
    pub child_age: u32,
    pub alimony_amount: i64,
    pub missed_payments: u32,
    /// Multiplier on enemy money drops; raised permanently by lucky breaks
    pub money_multiplier: f64,
    pub visitation_active: bool,
    visitation_turns: u32,
    turns_today: u32,
    last_child_event_day: u32,
    last_emergency_day: u32,
    total_expenses: i64,
    events_experienced: Vec<String>,
    phase: GamePhase,
    messages: Vec<String>,
    occurrences: Vec<Occurrence>,
    session: SessionConfig,
    rng: StdRng,
}

impl GameState {
    /// Starts a new session: validates the content tables, applies the
    /// starting job, and generates the first floor.
    pub fn new(session: SessionConfig) -> ShiftResult<Self> {
        themes::validate_content()?;

        let mut player = Player::new();
        let bonuses = session.starting_job.bonuses();
        player.max_health += bonuses.health;
        player.health = player.max_health;
        player.money += bonuses.money;
        player.base_attack += bonuses.attack;
        player.defense += bonuses.defense;
        player.name = session.player_name.clone();

        let mut state = Self {
            player,
            map: GameMap::new(config::MAP_WIDTH, config::MAP_HEIGHT),
            current_floor: 1,
            current_day: 1,
            current_month: 1,
            current_year: 1,
            days_until_payment: config::DAYS_PER_MONTH as i32,
            child_age: config::CHILD_STARTING_AGE,
            alimony_amount: config::STARTING_ALIMONY,
            missed_payments: 0,
            money_multiplier: session.starting_job.money_multiplier(),
            visitation_active: false,
            visitation_turns: 0,
            turns_today: 0,
            last_child_event_day: 0,
            last_emergency_day: 0,
            total_expenses: 0,
            events_experienced: Vec::new(),
            phase: GamePhase::Running,
            messages: Vec::new(),
            occurrences: Vec::new(),
            rng: StdRng::seed_from_u64(session.seed),
            session,
        };

        state.generate_floor()?;
        let start = state.map.player_start_position();
        state.player.set_position(start);

        let theme = job_theme_for_floor(state.current_floor);
        let intro = format!("{} clocks in at the {}.", state.player.name, theme.name);
        state.log(intro);
        state.log(theme.description.to_string());
        let due = format!(
            "Alimony for {} due in {} days: {}",
            state.session.child_name,
            state.days_until_payment,
            format_money(state.alimony_amount)
        );
        state.log(due);

        info!(
            "new session: seed {}, starting job {}",
            state.session.seed,
            state.session.starting_job.title()
        );

        Ok(state)
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// True while the session accepts intents.
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Why the session ended, if it has.
    pub fn end_reason(&self) -> Option<EndReason> {
        match self.phase {
            GamePhase::Running => None,
            GamePhase::Ended(reason) => Some(reason),
        }
    }

    /// The session options this run was started with.
    pub fn session(&self) -> &SessionConfig {
        &self.session
    }

    /// Ordered log history, oldest first.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// The most recent `count` log messages.
    pub fn recent_messages(&self, count: usize) -> &[String] {
        let start = self.messages.len().saturating_sub(count);
        &self.messages[start..]
    }

    /// Drains the feedback events accumulated since the last drain.
    /// Consuming them has no effect on game state.
    pub fn take_occurrences(&mut self) -> Vec<Occurrence> {
        std::mem::take(&mut self.occurrences)
    }

    /// Scripted life-event texts the player has lived through, in order.
    pub fn events_experienced(&self) -> &[String] {
        &self.events_experienced
    }

    /// Money spent on rent and emergencies (everything but alimony).
    pub fn total_expenses(&self) -> i64 {
        self.total_expenses
    }

    /// The end-of-game record, available once the session has ended.
    pub fn final_summary(&self) -> Option<ScoreSummary> {
        let reason = self.end_reason()?;
        Some(ScoreSummary {
            player_name: self.session.player_name.clone(),
            child_name: self.session.child_name.clone(),
            years_worked: self.current_year - 1,
            final_child_age: self.child_age,
            total_earned: self.player.total_money_earned,
            total_alimony_paid: self.player.total_alimony_paid,
            enemies_killed: self.player.enemies_killed,
            floors_explored: self.player.floors_explored,
            final_level: self.player.level,
            victory: reason == EndReason::Victory,
        })
    }

    /// Routes a validated intent to the matching operation. Malformed or
    /// out-of-phase intents are silently rejected with no state change;
    /// `Quit` is a front-end concern and leaves the session untouched.
    pub fn apply_intent(&mut self, intent: PlayerIntent) -> ShiftResult<()> {
        if !intent.is_valid() {
            return Ok(());
        }
        match intent {
            PlayerIntent::Move { dx, dy } => self.process_move(dx, dy),
            PlayerIntent::UseStairs(direction) => self.use_stairs(direction),
            PlayerIntent::Restart => self.restart(),
            PlayerIntent::Quit => Ok(()),
        }
    }

    /// Processes one movement intent. Bumping an NPC talks to it, bumping
    /// an enemy attacks it, stepping onto an item picks it up. Every
    /// outcome except a blocked move advances exactly one turn.
    pub fn process_move(&mut self, dx: i32, dy: i32) -> ShiftResult<()> {
        if !self.is_running() {
            return Ok(());
        }
        // Exactly one axis moves, by one cell.
        if !((-1..=1).contains(&dx) && (-1..=1).contains(&dy)) || (dx == 0) == (dy == 0) {
            return Ok(());
        }

        let target = Position::new(self.player.pos.x + dx, self.player.pos.y + dy);
        if self.map.npc_at(target).is_some() {
            self.handle_npc_interaction(target);
            self.process_turn();
            return Ok(());
        }

        match self.player.try_move(dx, dy, &self.map) {
            MoveOutcome::Combat(enemy_id) => self.handle_combat(enemy_id),
            MoveOutcome::Item => self.handle_item_pickup(),
            MoveOutcome::StairsDown => {
                self.log("Stairs down to the next shift. Use them when ready.".to_string());
            }
            MoveOutcome::StairsUp => {
                self.log("Stairs back up to the previous shift.".to_string());
            }
            MoveOutcome::Moved => {
                if self.rng.gen::<f64>() < 0.05 {
                    let theme = job_theme_for_floor(self.current_floor);
                    let line = theme.flavor_text[self.rng.gen_range(0..theme.flavor_text.len())];
                    self.log(line.to_string());
                }
            }
            MoveOutcome::Blocked => return Ok(()),
        }

        self.process_turn();
        Ok(())
    }

    /// Uses the staircase under the player. Valid use regenerates the
    /// whole floor and counts as a turn; standing anywhere else (or trying
    /// to go up from floor 1) is silently rejected and costs nothing.
    pub fn use_stairs(&mut self, direction: StairDirection) -> ShiftResult<()> {
        if !self.is_running() {
            return Ok(());
        }

        let tile = self.map.tile_at(self.player.pos);
        match direction {
            StairDirection::Down if tile == TileKind::StairsDown => {
                self.current_floor += 1;
                self.generate_floor()?;

                let start = self
                    .map
                    .stairs_up
                    .unwrap_or_else(|| self.map.player_start_position());
                self.player.set_position(start);

                let theme = job_theme_for_floor(self.current_floor);
                self.log(format!("--- {} ---", theme.name));
                self.log(theme.description.to_string());
                self.push_occurrence(Occurrence::NewFloor);
            }
            StairDirection::Up if tile == TileKind::StairsUp && self.current_floor > 1 => {
                self.current_floor -= 1;
                self.generate_floor()?;

                let start = self
                    .map
                    .stairs_down
                    .unwrap_or_else(|| self.map.player_start_position());
                self.player.set_position(start);

                self.log(format!("Back to floor {}.", self.current_floor));
                self.push_occurrence(Occurrence::NewFloor);
            }
            _ => return Ok(()),
        }

        self.process_turn();
        Ok(())
    }

    /// Uses an inventory item by slot index. A menu action: it does not
    /// consume a turn.
    pub fn use_item(&mut self, index: usize) {
        if !self.is_running() {
            return;
        }
        if let Some(message) = self.player.use_inventory_item(index) {
            self.log(message);
        }
    }

    /// Resets the session to a fresh run with the same options and seed.
    pub fn restart(&mut self) -> ShiftResult<()> {
        *self = GameState::new(self.session.clone())?;
        Ok(())
    }

    /// Regenerates the current floor wholesale. Revisited floors are
    /// rebuilt from scratch, enemies and all.
    fn generate_floor(&mut self) -> ShiftResult<()> {
        let gen_config = GenerationConfig::new(self.session.seed, self.current_floor);
        self.map = FloorGenerator::new().generate(&gen_config, &mut self.rng)?;
        self.player.floors_explored = self.player.floors_explored.max(self.current_floor);
        Ok(())
    }

    /// Adds a message to the capped log history.
    fn log(&mut self, message: String) {
        self.messages.push(message);
        if self.messages.len() > MAX_LOG_MESSAGES {
            self.messages.remove(0);
        }
    }

    fn push_occurrence(&mut self, occurrence: Occurrence) {
        self.occurrences.push(occurrence);
    }

    /// One-time NPC conversation: a dialogue line, maybe a money gift,
    /// maybe an item. Spoken NPCs just nod from then on.
    fn handle_npc_interaction(&mut self, target: Position) {
        let Some(npc) = self.map.npc_at(target) else {
            return;
        };

        if npc.spoken {
            let name = npc.name.clone();
            self.log(format!("{} nods at you silently.", name));
            return;
        }

        let name = npc.name.clone();
        let line = npc.dialogue[self.rng.gen_range(0..npc.dialogue.len())].clone();
        let money_gift = npc.money_gift;
        let item_gift = npc.item_gift.clone();

        if let Some(npc) = self.map.npc_at_mut(target) {
            npc.spoken = true;
        }

        self.log(format!("{}: {}", name, line));
        self.push_occurrence(Occurrence::NpcTalk);

        if money_gift[1] > 0 {
            let amount = self.rng.gen_range(money_gift[0]..=money_gift[1]);
            if amount > 0 {
                self.player.add_money(amount);
                self.log(format!("They gave you {}.", format_money(amount)));
                self.push_occurrence(Occurrence::MoneyGained);
            }
        }

        if let Some(key) = item_gift {
            if let Some(spec) = item_spec(&key) {
                self.log(format!("They gave you a {}.", spec.name));
                match spec.kind {
                    ItemSpecKind::Consumable { heal } => {
                        self.player.heal(heal);
                        self.log(format!("You feel a bit better. (+{} HP)", heal));
                        self.push_occurrence(Occurrence::Healed);
                    }
                    ItemSpecKind::Weapon(range) => {
                        let bonus = genutils::roll_range(&mut self.rng, range);
                        self.stash_gift(spec.name, ItemKind::Weapon(bonus));
                    }
                    ItemSpecKind::Armor(range) => {
                        let bonus = genutils::roll_range(&mut self.rng, range);
                        self.stash_gift(spec.name, ItemKind::Armor(bonus));
                    }
                    ItemSpecKind::MoneyRange(range) => {
                        let amount = if range[1] > range[0] {
                            self.rng.gen_range(range[0]..=range[1])
                        } else {
                            range[0]
                        };
                        self.player.add_money(amount);
                        self.push_occurrence(Occurrence::MoneyGained);
                    }
                }
            }
        }
    }

    /// Puts a gifted piece of equipment in the inventory, reporting a full
    /// pack instead of dropping the item silently.
    fn stash_gift(&mut self, name: &str, kind: ItemKind) {
        let item = CarriedItem { name: name.to_string(), kind };
        if self.player.add_to_inventory(item).is_err() {
            self.log("Your hands are full; you have to leave it behind.".to_string());
        }
    }

    /// Resolves a bump attack. The player always strikes first; a kill
    /// pays out money and experience and removes the enemy before it ever
    /// gets to retaliate.
    fn handle_combat(&mut self, enemy_id: EntityId) {
        let attack_power = self.player.attack_power();
        let Some(enemy) = self.map.enemy_mut(enemy_id) else {
            return;
        };

        let damage = enemy.take_damage(attack_power);
        let name = enemy.name.clone();
        let died = !enemy.is_alive();
        let exp_value = enemy.exp_value;
        let base_drop = if died { enemy.roll_money_drop(&mut self.rng) } else { 0 };

        self.log(format_message(
            MSG_ENEMY_HIT,
            &[("enemy", name.clone()), ("damage", damage.to_string())],
        ));
        self.push_occurrence(Occurrence::CombatHit);

        if died {
            let money = (base_drop as f64 * self.money_multiplier).floor() as i64;
            self.player.add_money(money);
            self.player.enemies_killed += 1;
            let leveled_up = self.player.add_exp(exp_value);

            self.log(format_message(
                MSG_ENEMY_KILLED,
                &[("enemy", name), ("money", format_money(money))],
            ));
            self.push_occurrence(Occurrence::EnemyKilled);
            self.push_occurrence(Occurrence::MoneyGained);

            if leveled_up {
                self.log(format_message(
                    MSG_LEVEL_UP,
                    &[("level", self.player.level.to_string())],
                ));
                self.push_occurrence(Occurrence::LevelUp);
            }

            self.map.remove_enemy(enemy_id);
        }
    }

    /// Picks up the item under the player. Money and consumables apply
    /// immediately; equipment is equipped, displacing the old piece into
    /// the inventory.
    fn handle_item_pickup(&mut self) {
        let Some(item) = self.map.take_item_at(self.player.pos) else {
            return;
        };

        match item.kind {
            ItemKind::Money(value) => {
                self.player.add_money(value);
                self.log(format!("{}: +{}", item.name, format_money(value)));
                self.push_occurrence(Occurrence::MoneyGained);
            }
            ItemKind::Consumable { effect: ConsumableEffect::Heal, amount } => {
                self.player.heal(amount);
                self.log(format!("{}: +{} HP", item.name, amount));
                self.push_occurrence(Occurrence::Healed);
            }
            ItemKind::Weapon(_) => {
                let old_attack = self.player.attack_power();
                self.player
                    .equip_weapon(CarriedItem { name: item.name.clone(), kind: item.kind });
                let new_attack = self.player.attack_power();
                self.log(format!(
                    "Equipped {}! ATK: {} -> {}",
                    item.name, old_attack, new_attack
                ));
                self.push_occurrence(Occurrence::Equipped);
            }
            ItemKind::Armor(_) => {
                let old_defense = self.player.defense + self.player.armor_bonus();
                self.player
                    .equip_armor(CarriedItem { name: item.name.clone(), kind: item.kind });
                let new_defense = self.player.defense + self.player.armor_bonus();
                self.log(format!(
                    "Equipped {}! DEF: {} -> {}",
                    item.name, old_defense, new_defense
                ));
                self.push_occurrence(Occurrence::Equipped);
            }
        }
    }

    /// Advances the world by one turn after an accepted player action.
    fn process_turn(&mut self) {
        if self.visitation_active {
            self.visitation_turns = self.visitation_turns.saturating_sub(1);
            if self.visitation_turns == 0 {
                self.end_visitation();
            }
        }

        if self.run_enemy_pass() {
            // The player did not survive the enemies' turns.
            return;
        }

        self.turns_today += 1;
        if self.turns_today >= config::TURNS_PER_DAY {
            self.turns_today = 0;
            self.advance_day();
        }
        if !self.is_running() {
            return;
        }

        self.check_random_events();
    }

    /// Runs every enemy's action in list order. Returns true if the player
    /// died to a retaliation.
    fn run_enemy_pass(&mut self) -> bool {
        let player_pos = self.player.pos;

        for i in 0..self.map.enemies.len() {
            if !self.map.enemies[i].is_alive() {
                continue;
            }
            if self.map.enemies[i].stunned {
                // The stun is consumed by the skipped action.
                self.map.enemies[i].stunned = false;
                continue;
            }

            let decision = {
                let map = &self.map;
                let enemy = &map.enemies[i];
                entities::decide(enemy, player_pos, &mut self.rng, |p| {
                    map.is_walkable(p) && map.enemy_at(p).is_none()
                })
            };

            match decision {
                EnemyAction::Attack => {
                    let (name, attack) = {
                        let enemy = &self.map.enemies[i];
                        (enemy.name.clone(), enemy.attack)
                    };
                    let damage = self.player.take_damage(attack);
                    self.log(format_message(
                        MSG_PLAYER_HIT,
                        &[("enemy", name), ("damage", damage.to_string())],
                    ));
                    self.push_occurrence(Occurrence::PlayerHit);

                    if !self.player.is_alive() {
                        self.end_game(EndReason::Health);
                        return true;
                    }
                }
                EnemyAction::Step(dest) => {
                    self.map.enemies[i].pos = dest;
                }
                EnemyAction::Wait => {}
            }
        }

        false
    }

    /// Rolls the calendar forward one day. The turn engine calls this
    /// automatically once the daily turn quota is spent.
    pub fn advance_day(&mut self) {
        self.current_day += 1;
        self.days_until_payment -= 1;

        if self.rng.gen::<f64>() < 0.2 {
            let line = events::DAILY_GRIND[self.rng.gen_range(0..events::DAILY_GRIND.len())];
            self.log(line.to_string());
        }

        if self.days_until_payment <= 0 {
            self.process_month_end();
            if !self.is_running() {
                return;
            }
        }

        if self.days_until_payment == 7 && self.player.money < self.alimony_amount {
            self.log("!!! One week until payment. You're short. !!!".to_string());
            self.push_occurrence(Occurrence::Warning);
        } else if self.days_until_payment == 3 && self.player.money < self.alimony_amount {
            self.log("!!! THREE DAYS. You need money. NOW. !!!".to_string());
            self.push_occurrence(Occurrence::Warning);
        }
    }

    /// Month-end settlement: rent first, then the alimony payment that
    /// actually matters. No partial payments on either.
    pub fn process_month_end(&mut self) {
        self.log("=== END OF MONTH ===".to_string());

        if self.player.spend_money(config::RENT) {
            self.total_expenses += config::RENT;
            self.log(format!("Rent paid: {}", format_money(config::RENT)));
        } else {
            self.log("Couldn't pay rent. Sleeping in your car.".to_string());
            // A flat toll; no defense softens a month in the car.
            self.player.health -= 10;
            if !self.player.is_alive() {
                self.end_game(EndReason::Health);
                return;
            }
        }

        if self.player.spend_money(self.alimony_amount) {
            self.player.total_alimony_paid += self.alimony_amount;
            self.missed_payments = 0;
            self.log(MSG_PAYMENT_SUCCESS.to_string());
            self.push_occurrence(Occurrence::PaymentSuccess);
        } else {
            self.missed_payments += 1;
            self.log(MSG_PAYMENT_FAILED.to_string());
            self.log(format!(
                "WARNING: {}/{} missed payments!",
                self.missed_payments,
                config::MAX_MISSED_PAYMENTS
            ));
            self.push_occurrence(Occurrence::PaymentFailed);

            if self.missed_payments >= config::MAX_MISSED_PAYMENTS {
                self.end_game(EndReason::Jail);
                return;
            }
        }

        self.current_month += 1;
        self.days_until_payment = config::DAYS_PER_MONTH as i32;

        if self.current_month > config::MONTHS_PER_YEAR {
            self.current_month = 1;
            self.advance_year();
            if !self.is_running() {
                return;
            }
        }

        let remaining = format!("{} remaining.", format_money(self.player.money));
        self.log(remaining);
        info!(
            "month settled: year {}, month {}, missed {}",
            self.current_year, self.current_month, self.missed_payments
        );
    }

    /// Year rollover: the child gets older, the alimony gets bigger, and
    /// age eighteen ends the whole thing in victory.
    pub fn advance_year(&mut self) {
        self.current_year += 1;
        self.child_age += 1;
        self.alimony_amount += config::ALIMONY_INCREASE_PER_YEAR;

        match events::milestone_for_age(self.child_age) {
            Some(template) => {
                let text = template.replace("{child}", &self.session.child_name);
                self.log(format!("=== YEAR {} ===", self.current_year));
                self.log(text.clone());
                self.events_experienced.push(text);
            }
            None => {
                let text = format_message(
                    MSG_CHILD_BIRTHDAY,
                    &[
                        ("child", self.session.child_name.clone()),
                        ("age", self.child_age.to_string()),
                    ],
                );
                self.log(text);
            }
        }

        if self.child_age >= config::CHILD_ADULT_AGE {
            self.end_game(EndReason::Victory);
        }
    }

    /// Independent probability gates, rolled every turn; several can fire
    /// in the same turn.
    fn check_random_events(&mut self) {
        if self.turns_today % 100 == 0
            && self.current_day.saturating_sub(self.last_child_event_day) > 3
            && self.rng.gen::<f64>() < 0.4
        {
            self.trigger_child_event();
            if !self.is_running() {
                return;
            }
        }

        if self.rng.gen::<f64>() < 0.005
            && self.current_day.saturating_sub(self.last_emergency_day) > 10
        {
            self.trigger_emergency();
            if !self.is_running() {
                return;
            }
        }

        if self.rng.gen::<f64>() < 0.01 {
            self.trigger_positive_event();
        }

        if self.rng.gen::<f64>() < 0.002 {
            self.check_lucky_break();
            if !self.is_running() {
                return;
            }
        }

        if self.current_day % 7 == 0 && !self.visitation_active && self.rng.gen::<f64>() < 0.3 {
            self.start_visitation();
        }
    }

    fn trigger_child_event(&mut self) {
        let event = events::CHILD_EVENTS[self.rng.gen_range(0..events::CHILD_EVENTS.len())];
        let text = event.text.replace("{child}", &self.session.child_name);

        self.log(format!("--- {} ---", text));
        self.last_child_event_day = self.current_day;
        self.events_experienced.push(text);
        self.push_occurrence(Occurrence::ChildEvent);

        match event.effect {
            ChildEffect::Heal(amount) => {
                self.player.heal(amount);
                self.push_occurrence(Occurrence::Healed);
            }
            ChildEffect::Stress(amount) => {
                self.player.take_damage(amount);
                if !self.player.is_alive() {
                    self.end_game(EndReason::Health);
                }
            }
            ChildEffect::None => {}
        }
    }

    fn trigger_emergency(&mut self) {
        let event =
            events::EMERGENCY_EVENTS[self.rng.gen_range(0..events::EMERGENCY_EVENTS.len())];
        let amount = self.rng.gen_range(event.cost[0]..=event.cost[1]);
        let text = event.text.replace("{child}", &self.session.child_name);

        self.log(format!("!!! {}{} !!!", text, amount));
        self.last_emergency_day = self.current_day;
        self.events_experienced.push(format!("{}{}", text, amount));
        self.push_occurrence(Occurrence::Emergency);

        if self.player.spend_money(amount) {
            self.total_expenses += amount;
            self.log(format!("You paid it. {} remaining.", format_money(self.player.money)));
        } else {
            let stress = (amount / 10) as i32;
            let dealt = self.player.take_damage(stress);
            self.log(format!("Can't pay. The stress hurts. (-{} HP)", dealt));
            if !self.player.is_alive() {
                self.end_game(EndReason::Health);
            }
        }
    }

    fn trigger_positive_event(&mut self) {
        let event = events::POSITIVE_EVENTS[self.rng.gen_range(0..events::POSITIVE_EVENTS.len())];

        self.log(format!("+ {} +", event.text));
        self.events_experienced.push(event.text.to_string());

        match event.effect {
            PositiveEffect::Money(range) => {
                let amount = if range[1] > range[0] {
                    self.rng.gen_range(range[0]..=range[1])
                } else {
                    range[0]
                };
                self.player.add_money(amount);
                self.push_occurrence(Occurrence::MoneyGained);
            }
            PositiveEffect::Heal(amount) => {
                self.player.heal(amount);
                self.push_occurrence(Occurrence::Healed);
            }
        }
    }

    /// Walks the lucky break table in order; the first entry whose own
    /// rarity roll passes fires, and only that one.
    fn check_lucky_break(&mut self) {
        for lucky in events::LUCKY_BREAKS {
            if self.rng.gen::<f64>() < lucky.rarity {
                self.trigger_lucky_break(lucky);
                break;
            }
        }
    }

    fn trigger_lucky_break(&mut self, lucky: &events::LuckyBreak) {
        let text = lucky.text.replace("{child}", &self.session.child_name);
        self.log("=== LUCKY BREAK! ===".to_string());
        self.log(text.clone());
        self.events_experienced.push(text);
        self.push_occurrence(Occurrence::LuckyBreak);

        match lucky.effect {
            LuckyBreakEffect::AlimonyTerminated => {
                self.log("You are free!".to_string());
                self.end_game(EndReason::Victory);
            }
            LuckyBreakEffect::CustodyReversal => {
                self.log(format!("{} chose you!", self.session.child_name));
                self.end_game(EndReason::Victory);
            }
            LuckyBreakEffect::Windfall(range) => {
                let amount = self.rng.gen_range(range[0]..=range[1]);
                self.player.add_money(amount);
                self.log(format!("+{}", format_money(amount)));
                self.push_occurrence(Occurrence::MoneyGained);
            }
            LuckyBreakEffect::ReduceAlimony(value) => {
                self.alimony_amount = (self.alimony_amount - value).max(100);
                self.log(format!("Alimony reduced to {}", format_money(self.alimony_amount)));
            }
            LuckyBreakEffect::Heal(amount) => {
                self.player.heal(amount);
                self.push_occurrence(Occurrence::Healed);
            }
            LuckyBreakEffect::PermanentRaise => {
                self.money_multiplier += 0.1;
                self.log("Money earned increased permanently!".to_string());
            }
        }
    }

    /// Starts the fixed-duration visitation period. Seeing the kid heals.
    fn start_visitation(&mut self) {
        self.visitation_active = true;
        self.visitation_turns = config::VISITATION_TURNS;

        self.log("=== VISITATION DAY ===".to_string());
        self.log(format!(
            "{} runs to hug you. You have {} turns together.",
            self.session.child_name,
            config::VISITATION_TURNS
        ));
        self.player.heal(20);
        self.push_occurrence(Occurrence::VisitationStart);
    }

    /// Ends visitation with a smaller, bittersweet heal.
    fn end_visitation(&mut self) {
        self.visitation_active = false;

        self.log("=== Time's up. They have to go back. ===".to_string());
        self.log(format!("\"Bye daddy. I love you.\" - {}", self.session.child_name));
        self.player.heal(10);
        self.push_occurrence(Occurrence::VisitationEnd);
    }

    /// Moves the session into a terminal phase. The first terminal state
    /// wins; later calls in the same turn are no-ops.
    fn end_game(&mut self, reason: EndReason) {
        if matches!(self.phase, GamePhase::Ended(_)) {
            return;
        }
        self.phase = GamePhase::Ended(reason);

        match reason {
            EndReason::Health => {
                self.log(MSG_GAME_OVER_HEALTH.to_string());
                self.push_occurrence(Occurrence::Defeat);
            }
            EndReason::Jail => {
                self.log(MSG_GAME_OVER_JAIL.to_string());
                self.push_occurrence(Occurrence::Defeat);
            }
            EndReason::Victory => {
                let text = format_message(
                    MSG_CHILD_ADULT,
                    &[("child", self.session.child_name.clone())],
                );
                self.log(text);
                self.push_occurrence(Occurrence::Victory);
            }
        }

        info!(
            "session ended: {:?} after {} years worked",
            reason,
            self.current_year - 1
        );
    }
}
