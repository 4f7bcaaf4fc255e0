//! # Job Themes and Content Tables
//!
//! Static definitions for everything the generator can place on a floor:
//! enemy stat blocks, item templates, NPC scripts, and the six job themes
//! that cycle as the player descends. Themes reference enemies and items by
//! key; `validate_content` checks every reference once at session start so
//! a dangling key can never surface mid-spawn.

use crate::{ShiftError, ShiftResult};

/// Stat block for an enemy kind, before floor scaling.
#[derive(Debug, Clone, Copy)]
pub struct EnemySpec {
    pub key: &'static str,
    pub name: &'static str,
    pub glyph: char,
    pub health: i32,
    pub attack: i32,
    pub defense: i32,
    pub exp_value: i32,
    /// Inclusive money drop range, before the theme multiplier
    pub money_drop: [i64; 2],
    pub is_boss: bool,
    pub description: &'static str,
}

/// Template magnitude for an item kind.
#[derive(Debug, Clone, Copy)]
pub enum ItemSpecKind {
    /// Value rolled in range at spawn time, then scaled by theme and floor
    MoneyRange([i64; 2]),
    /// Fixed heal amount
    Consumable { heal: i32 },
    /// Attack bonus rolled in range, plus half the floor number
    Weapon([i32; 2]),
    /// Defense bonus rolled in range, plus half the floor number
    Armor([i32; 2]),
}

/// Template for a spawnable item.
#[derive(Debug, Clone, Copy)]
pub struct ItemSpec {
    pub key: &'static str,
    pub name: &'static str,
    pub glyph: char,
    pub kind: ItemSpecKind,
    pub description: &'static str,
}

/// Script for a friendly coworker NPC.
#[derive(Debug, Clone, Copy)]
pub struct NpcSpec {
    pub key: &'static str,
    pub name: &'static str,
    pub glyph: char,
    pub dialogue: &'static [&'static str],
    /// Inclusive money gift range; [0, 0] means no money
    pub money_gift: [i64; 2],
    /// Item spec key handed over on first talk
    pub item_gift: Option<&'static str>,
}

/// A job theme: the bundle of enemies, items, pay multiplier, and flavor
/// that defines one kind of shift.
#[derive(Debug, Clone, Copy)]
pub struct JobTheme {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Scales enemy drops and found money on this theme's floors
    pub money_multiplier: f64,
    /// Rough difficulty tier, for front ends that want to show it
    pub danger_level: u32,
    pub enemies: &'static [&'static str],
    pub items: &'static [&'static str],
    pub flavor_text: &'static [&'static str],
}

pub static ENEMY_SPECS: &[EnemySpec] = &[
    EnemySpec {
        key: "sewer_rat",
        name: "Sewer Rat",
        glyph: 'r',
        health: 10,
        attack: 3,
        defense: 1,
        exp_value: 5,
        money_drop: [1, 5],
        is_boss: false,
        description: "A desperate rat, much like yourself.",
    },
    EnemySpec {
        key: "debt_collector",
        name: "Debt Collector",
        glyph: 'D',
        health: 30,
        attack: 8,
        defense: 5,
        exp_value: 20,
        money_drop: [10, 30],
        is_boss: false,
        description: "They always find you.",
    },
    EnemySpec {
        key: "lawyer",
        name: "Lawyer",
        glyph: 'L',
        health: 25,
        attack: 15,
        defense: 3,
        exp_value: 30,
        money_drop: [20, 50],
        is_boss: false,
        description: "Their words cut deeper than swords.",
    },
    EnemySpec {
        key: "angry_boss",
        name: "Angry Boss",
        glyph: 'B',
        health: 50,
        attack: 12,
        defense: 8,
        exp_value: 50,
        money_drop: [50, 100],
        is_boss: false,
        description: "WHERE HAVE YOU BEEN?!",
    },
    EnemySpec {
        key: "the_ex",
        name: "Your Ex-Wife",
        glyph: 'X',
        health: 100,
        attack: 20,
        defense: 10,
        exp_value: 100,
        money_drop: [0, 0],
        is_boss: true,
        description: "She wants more than you can give.",
    },
    EnemySpec {
        key: "irate_karen",
        name: "Irate Karen",
        glyph: 'K',
        health: 15,
        attack: 6,
        defense: 1,
        exp_value: 10,
        money_drop: [5, 15],
        is_boss: false,
        description: "She would like to speak to your manager. You ARE the manager.",
    },
    EnemySpec {
        key: "grease_fire",
        name: "Grease Fire",
        glyph: 'f',
        health: 8,
        attack: 5,
        defense: 0,
        exp_value: 8,
        money_drop: [0, 5],
        is_boss: false,
        description: "The fryer finally had enough.",
    },
    EnemySpec {
        key: "runaway_forklift",
        name: "Runaway Forklift",
        glyph: 'F',
        health: 25,
        attack: 10,
        defense: 4,
        exp_value: 18,
        money_drop: [5, 20],
        is_boss: false,
        description: "Nobody certified it. Nobody stopped it.",
    },
    EnemySpec {
        key: "box_avalanche",
        name: "Box Avalanche",
        glyph: 'b',
        health: 18,
        attack: 7,
        defense: 2,
        exp_value: 12,
        money_drop: [3, 12],
        is_boss: false,
        description: "Stacked past the safety line again.",
    },
    EnemySpec {
        key: "drunk_passenger",
        name: "Drunk Passenger",
        glyph: 'P',
        health: 16,
        attack: 7,
        defense: 1,
        exp_value: 12,
        money_drop: [8, 25],
        is_boss: false,
        description: "One star for not letting him drive.",
    },
    EnemySpec {
        key: "road_rager",
        name: "Road Rager",
        glyph: 'R',
        health: 22,
        attack: 9,
        defense: 3,
        exp_value: 16,
        money_drop: [5, 18],
        is_boss: false,
        description: "He will follow you for three exits to make a point.",
    },
    EnemySpec {
        key: "safety_inspector",
        name: "Safety Inspector",
        glyph: 'I',
        health: 28,
        attack: 11,
        defense: 5,
        exp_value: 22,
        money_drop: [10, 30],
        is_boss: false,
        description: "Here to find violations, and he will.",
    },
    EnemySpec {
        key: "loose_girder",
        name: "Loose Girder",
        glyph: 'g',
        health: 14,
        attack: 12,
        defense: 0,
        exp_value: 15,
        money_drop: [0, 8],
        is_boss: false,
        description: "Gravity works for free.",
    },
    EnemySpec {
        key: "midnight_trespasser",
        name: "Midnight Trespasser",
        glyph: 't',
        health: 18,
        attack: 8,
        defense: 2,
        exp_value: 14,
        money_drop: [5, 20],
        is_boss: false,
        description: "Swears he left his wallet in there.",
    },
    EnemySpec {
        key: "dumpster_raccoon",
        name: "Dumpster Raccoon",
        glyph: 'c',
        health: 10,
        attack: 4,
        defense: 1,
        exp_value: 7,
        money_drop: [1, 6],
        is_boss: false,
        description: "Technically not on the org chart.",
    },
    EnemySpec {
        key: "furious_caller",
        name: "Furious Caller",
        glyph: 'Q',
        health: 20,
        attack: 12,
        defense: 1,
        exp_value: 18,
        money_drop: [8, 22],
        is_boss: false,
        description: "Has been on hold for forty minutes and you will pay for it.",
    },
    EnemySpec {
        key: "middle_manager",
        name: "Middle Manager",
        glyph: 'M',
        health: 30,
        attack: 9,
        defense: 6,
        exp_value: 24,
        money_drop: [15, 35],
        is_boss: false,
        description: "Circles back, touches base, ruins your metrics.",
    },
];

pub static ITEM_SPECS: &[ItemSpec] = &[
    ItemSpec {
        key: "loose_cash",
        name: "Loose Cash",
        glyph: '$',
        kind: ItemSpecKind::MoneyRange([5, 25]),
        description: "Cold, hard cash.",
    },
    ItemSpec {
        key: "tip",
        name: "Tip",
        glyph: '$',
        kind: ItemSpecKind::MoneyRange([10, 40]),
        description: "Crumpled bills somebody actually left.",
    },
    ItemSpec {
        key: "bonus",
        name: "Bonus Check",
        glyph: '$',
        kind: ItemSpecKind::MoneyRange([50, 100]),
        description: "A performance bonus. A real one.",
    },
    ItemSpec {
        key: "energy_drink",
        name: "Energy Drink",
        glyph: '!',
        kind: ItemSpecKind::Consumable { heal: 25 },
        description: "Keeps you going for another shift.",
    },
    ItemSpec {
        key: "coffee",
        name: "Break Room Coffee",
        glyph: '!',
        kind: ItemSpecKind::Consumable { heal: 15 },
        description: "Burnt, but it works.",
    },
    ItemSpec {
        key: "leftover_pizza",
        name: "Leftover Pizza",
        glyph: '!',
        kind: ItemSpecKind::Consumable { heal: 20 },
        description: "From a meeting you were not invited to.",
    },
    ItemSpec {
        key: "first_aid_kit",
        name: "First Aid Kit",
        glyph: '!',
        kind: ItemSpecKind::Consumable { heal: 40 },
        description: "OSHA-mandated and almost fully stocked.",
    },
    ItemSpec {
        key: "spatula",
        name: "Grill Spatula",
        glyph: ')',
        kind: ItemSpecKind::Weapon([2, 6]),
        description: "Wide, flat, surprisingly threatening.",
    },
    ItemSpec {
        key: "box_cutter",
        name: "Box Cutter",
        glyph: ')',
        kind: ItemSpecKind::Weapon([4, 9]),
        description: "Standard issue, questionable edge.",
    },
    ItemSpec {
        key: "tire_iron",
        name: "Tire Iron",
        glyph: ')',
        kind: ItemSpecKind::Weapon([5, 10]),
        description: "Lives in the trunk for emergencies like these.",
    },
    ItemSpec {
        key: "claw_hammer",
        name: "Claw Hammer",
        glyph: ')',
        kind: ItemSpecKind::Weapon([6, 12]),
        description: "A tool that doubles as a weapon.",
    },
    ItemSpec {
        key: "flashlight",
        name: "Security Flashlight",
        glyph: ')',
        kind: ItemSpecKind::Weapon([3, 7]),
        description: "Four D batteries of justice.",
    },
    ItemSpec {
        key: "broken_headset",
        name: "Broken Headset",
        glyph: ')',
        kind: ItemSpecKind::Weapon([2, 5]),
        description: "The cord makes a decent flail.",
    },
    ItemSpec {
        key: "work_uniform",
        name: "Work Uniform",
        glyph: '[',
        kind: ItemSpecKind::Armor([2, 5]),
        description: "Offers some protection.",
    },
    ItemSpec {
        key: "hairnet",
        name: "Regulation Hairnet",
        glyph: '[',
        kind: ItemSpecKind::Armor([1, 3]),
        description: "Protects against almost nothing.",
    },
    ItemSpec {
        key: "back_brace",
        name: "Back Brace",
        glyph: '[',
        kind: ItemSpecKind::Armor([3, 6]),
        description: "Ten years too late.",
    },
    ItemSpec {
        key: "hard_hat",
        name: "Hard Hat",
        glyph: '[',
        kind: ItemSpecKind::Armor([4, 8]),
        description: "Required beyond this point.",
    },
    ItemSpec {
        key: "guard_jacket",
        name: "Guard Jacket",
        glyph: '[',
        kind: ItemSpecKind::Armor([3, 7]),
        description: "The patch says SECURITY, so it must be true.",
    },
];

pub static NPC_SPECS: &[NpcSpec] = &[
    NpcSpec {
        key: "night_janitor",
        name: "Night Janitor",
        glyph: 'j',
        dialogue: &[
            "Twenty-two years I've mopped these floors. Outlasted six managers.",
            "You look tired, friend. Worse than the usual tired.",
            "Nobody sees the janitor. That's how you learn everything.",
        ],
        money_gift: [0, 0],
        item_gift: Some("coffee"),
    },
    NpcSpec {
        key: "old_timer",
        name: "Old Timer",
        glyph: 'o',
        dialogue: &[
            "Had a pension once. Company 'restructured' it into a pizza party.",
            "Kid, take the overtime. The knees go either way.",
            "I remember when this job came with dental.",
        ],
        money_gift: [5, 20],
        item_gift: None,
    },
    NpcSpec {
        key: "union_rep",
        name: "Union Rep",
        glyph: 'u',
        dialogue: &[
            "Document everything. Everything.",
            "They can't fire you for talking to me. Probably.",
            "Sign the card. Worst case, nothing changes. Best case, everything.",
        ],
        money_gift: [0, 0],
        item_gift: Some("first_aid_kit"),
    },
    NpcSpec {
        key: "fellow_parent",
        name: "Fellow Parent",
        glyph: 'p',
        dialogue: &[
            "Mine turns eighteen in March. We're almost free, you and me.",
            "Custody weekends are the only thing keeping me clocking in.",
            "Here. Us single parents have to stick together.",
        ],
        money_gift: [10, 40],
        item_gift: None,
    },
];

pub static JOB_THEMES: &[JobTheme] = &[
    JobTheme {
        key: "fast_food",
        name: "Burger Barn",
        description: "Flip burgers, mop floors, deal with Karens. Low pay but steady work.",
        money_multiplier: 1.0,
        danger_level: 1,
        enemies: &["sewer_rat", "irate_karen", "grease_fire"],
        items: &["spatula", "hairnet", "energy_drink", "leftover_pizza"],
        flavor_text: &[
            "The fryer hisses like it holds a grudge.",
            "Someone ordered forty burgers and paid in nickels.",
            "The ice cream machine is, of course, broken.",
        ],
    },
    JobTheme {
        key: "warehouse",
        name: "Fulfillment Center",
        description: "Move boxes until your back gives out. Hard labor, decent pay.",
        money_multiplier: 1.2,
        danger_level: 2,
        enemies: &["sewer_rat", "runaway_forklift", "box_avalanche"],
        items: &["box_cutter", "back_brace", "energy_drink", "coffee"],
        flavor_text: &[
            "The scanner beeps. It always beeps. It will never stop beeping.",
            "Your pick rate is 2% below target. A robot noticed.",
            "Aisle 14 smells like regret and cardboard.",
        ],
    },
    JobTheme {
        key: "rideshare",
        name: "Rideshare Night Shift",
        description: "Your car is your office. Meet interesting strangers. Flexible hours.",
        money_multiplier: 1.3,
        danger_level: 2,
        enemies: &["drunk_passenger", "road_rager"],
        items: &["tire_iron", "work_uniform", "coffee", "energy_drink"],
        flavor_text: &[
            "Surge pricing is on. So is your check-engine light.",
            "A passenger rates you four stars for 'vibes'.",
            "The app suggests you smile more. The app can't see you.",
        ],
    },
    JobTheme {
        key: "construction",
        name: "Construction Site",
        description: "Dangerous work, good pay. One wrong step and you're done.",
        money_multiplier: 1.5,
        danger_level: 3,
        enemies: &["safety_inspector", "loose_girder", "angry_boss"],
        items: &["claw_hammer", "hard_hat", "first_aid_kit", "energy_drink"],
        flavor_text: &[
            "The foreman doesn't care about your custody schedule.",
            "Somebody's radio plays the same four songs all day.",
            "The scaffolding creaks in a way you choose not to think about.",
        ],
    },
    JobTheme {
        key: "security",
        name: "Night Security",
        description: "Night shifts watching nothing happen. Peaceful but lonely.",
        money_multiplier: 1.1,
        danger_level: 1,
        enemies: &["midnight_trespasser", "dumpster_raccoon", "sewer_rat"],
        items: &["flashlight", "guard_jacket", "coffee", "first_aid_kit"],
        flavor_text: &[
            "Camera 7 has been static since 2019. Nobody fixes it.",
            "The silence gives you too much time to think.",
            "Something knocked over a trash can. Probably something small.",
        ],
    },
    JobTheme {
        key: "call_center",
        name: "Call Center",
        description: "Get yelled at by strangers for things you didn't do.",
        money_multiplier: 1.4,
        danger_level: 3,
        enemies: &["furious_caller", "middle_manager", "angry_boss"],
        items: &["broken_headset", "work_uniform", "coffee", "energy_drink"],
        flavor_text: &[
            "\"Your call is important to us.\" It isn't.",
            "Average handle time is up. Morale is not.",
            "The script says to apologize. The script always says to apologize.",
        ],
    },
];

/// Weighted money subtype draw: plain cash is common, tips less so, and a
/// bonus check is the rare jackpot.
pub static MONEY_SUBTYPES: &[&str] = &["loose_cash", "loose_cash", "loose_cash", "tip", "tip", "bonus"];

/// Looks up an enemy stat block by key.
pub fn enemy_spec(key: &str) -> Option<&'static EnemySpec> {
    ENEMY_SPECS.iter().find(|spec| spec.key == key)
}

/// Looks up an item template by key.
pub fn item_spec(key: &str) -> Option<&'static ItemSpec> {
    ITEM_SPECS.iter().find(|spec| spec.key == key)
}

/// The job theme for a floor: themes cycle in table order as the player
/// descends.
///
/// # Examples
///
/// ```
/// use gigshift::generation::themes::{job_theme_for_floor, JOB_THEMES};
///
/// assert_eq!(job_theme_for_floor(1).key, JOB_THEMES[0].key);
/// assert_eq!(
///     job_theme_for_floor(1 + JOB_THEMES.len() as u32).key,
///     JOB_THEMES[0].key,
/// );
/// ```
pub fn job_theme_for_floor(floor: u32) -> &'static JobTheme {
    let index = (floor.saturating_sub(1) as usize) % JOB_THEMES.len();
    &JOB_THEMES[index]
}

/// Validates that every cross-table reference resolves.
///
/// Run once at session start; catching a dangling key here means spawn code
/// can assume lookups succeed.
pub fn validate_content() -> ShiftResult<()> {
    for theme in JOB_THEMES {
        if theme.enemies.is_empty() || theme.items.is_empty() || theme.flavor_text.is_empty() {
            return Err(ShiftError::Content(format!(
                "theme '{}' has an empty content pool",
                theme.key
            )));
        }
        for key in theme.enemies {
            if enemy_spec(key).is_none() {
                return Err(ShiftError::Content(format!(
                    "theme '{}' references unknown enemy '{}'",
                    theme.key, key
                )));
            }
        }
        for key in theme.items {
            if item_spec(key).is_none() {
                return Err(ShiftError::Content(format!(
                    "theme '{}' references unknown item '{}'",
                    theme.key, key
                )));
            }
        }
    }

    for key in MONEY_SUBTYPES {
        match item_spec(key) {
            Some(spec) => {
                if !matches!(spec.kind, ItemSpecKind::MoneyRange(_)) {
                    return Err(ShiftError::Content(format!(
                        "money subtype '{}' is not a money item",
                        key
                    )));
                }
            }
            None => {
                return Err(ShiftError::Content(format!(
                    "unknown money subtype '{}'",
                    key
                )));
            }
        }
    }

    for npc in NPC_SPECS {
        if let Some(gift) = npc.item_gift {
            if item_spec(gift).is_none() {
                return Err(ShiftError::Content(format!(
                    "NPC '{}' gifts unknown item '{}'",
                    npc.key, gift
                )));
            }
        }
        if npc.dialogue.is_empty() {
            return Err(ShiftError::Content(format!(
                "NPC '{}' has no dialogue",
                npc.key
            )));
        }
    }

    Ok(())
}
