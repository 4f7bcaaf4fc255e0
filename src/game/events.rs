//! # Life Events
//!
//! The scripted events that interrupt the grind: moments with the kid,
//! emergency bills, small wins, and the vanishingly rare lucky breaks that
//! can end the game on the spot. Tables live here; the per-turn probability
//! gates that fire them live in the session engine.

/// Effect of a child vignette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildEffect {
    /// A good moment restores some health
    Heal(i32),
    /// A hard moment costs some health
    Stress(i32),
    /// Some moments just are
    None,
}

/// A short scripted moment involving the child. `{child}` is substituted
/// with the child's name.
#[derive(Debug, Clone, Copy)]
pub struct ChildEvent {
    pub text: &'static str,
    pub effect: ChildEffect,
}

/// An unexpected bill. The cost is rolled in the inclusive range; if the
/// player can't cover it, the stress deals damage instead.
#[derive(Debug, Clone, Copy)]
pub struct EmergencyEvent {
    pub text: &'static str,
    pub cost: [i64; 2],
}

/// Effect of a positive event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositiveEffect {
    Money([i64; 2]),
    Heal(i32),
}

/// A small good thing.
#[derive(Debug, Clone, Copy)]
pub struct PositiveEvent {
    pub text: &'static str,
    pub effect: PositiveEffect,
}

/// Effect of a lucky break. Two of these end the game in victory outright;
/// the rest permanently improve the player's situation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LuckyBreakEffect {
    /// The ex remarried; alimony is terminated. Instant victory.
    AlimonyTerminated,
    /// The child chose to live with the player. Instant victory.
    CustodyReversal,
    /// One-time money windfall
    Windfall([i64; 2]),
    /// Permanent reduction of the monthly alimony, floored at 100
    ReduceAlimony(i64),
    /// One-time heal
    Heal(i32),
    /// Permanent +0.1 to the money multiplier
    PermanentRaise,
}

/// A very rare, high-impact event. Each entry carries its own rarity; the
/// engine walks the table in order and applies at most one per check.
#[derive(Debug, Clone, Copy)]
pub struct LuckyBreak {
    pub text: &'static str,
    pub rarity: f64,
    pub effect: LuckyBreakEffect,
}

pub static CHILD_EVENTS: &[ChildEvent] = &[
    ChildEvent {
        text: "{child} calls to tell you about the science fair. First place.",
        effect: ChildEffect::Heal(15),
    },
    ChildEvent {
        text: "{child} drew you a picture. It's on somebody else's fridge.",
        effect: ChildEffect::Stress(5),
    },
    ChildEvent {
        text: "{child} asks when you're coming to a game. You don't know.",
        effect: ChildEffect::Stress(8),
    },
    ChildEvent {
        text: "A voicemail from {child}: 'Just wanted to say hi, Dad.'",
        effect: ChildEffect::Heal(10),
    },
    ChildEvent {
        text: "{child} lost a tooth and saved it to show you.",
        effect: ChildEffect::Heal(12),
    },
    ChildEvent {
        text: "School photos came in the mail. {child} has your smile.",
        effect: ChildEffect::None,
    },
    ChildEvent {
        text: "{child} learned to ride a bike. Someone else was holding the seat.",
        effect: ChildEffect::Stress(6),
    },
];

pub static EMERGENCY_EVENTS: &[EmergencyEvent] = &[
    EmergencyEvent { text: "Your car needs a new transmission: $", cost: [150, 400] },
    EmergencyEvent { text: "Emergency dental work: $", cost: [100, 300] },
    EmergencyEvent { text: "The landlord is charging for 'damages': $", cost: [80, 250] },
    EmergencyEvent { text: "{child} needs new school supplies: $", cost: [50, 150] },
    EmergencyEvent { text: "Your phone died and you need it for work: $", cost: [100, 200] },
];

pub static POSITIVE_EVENTS: &[PositiveEvent] = &[
    PositiveEvent {
        text: "A customer actually tipped in cash.",
        effect: PositiveEffect::Money([10, 50]),
    },
    PositiveEvent {
        text: "You found a twenty in an old jacket.",
        effect: PositiveEffect::Money([20, 20]),
    },
    PositiveEvent {
        text: "Overtime came through this week.",
        effect: PositiveEffect::Money([40, 90]),
    },
    PositiveEvent {
        text: "A full night's sleep, for once.",
        effect: PositiveEffect::Heal(20),
    },
    PositiveEvent {
        text: "The break room had free donuts.",
        effect: PositiveEffect::Heal(10),
    },
];

pub static LUCKY_BREAKS: &[LuckyBreak] = &[
    LuckyBreak {
        text: "Your ex got remarried. The alimony order is terminated.",
        rarity: 0.05,
        effect: LuckyBreakEffect::AlimonyTerminated,
    },
    LuckyBreak {
        text: "The judge granted the custody modification. {child} is coming to live with you.",
        rarity: 0.05,
        effect: LuckyBreakEffect::CustodyReversal,
    },
    LuckyBreak {
        text: "A scratch-off ticket actually hit.",
        rarity: 0.3,
        effect: LuckyBreakEffect::Windfall([200, 800]),
    },
    LuckyBreak {
        text: "Your lawyer got the monthly payment reduced.",
        rarity: 0.2,
        effect: LuckyBreakEffect::ReduceAlimony(150),
    },
    LuckyBreak {
        text: "A weekend off. An actual, whole weekend.",
        rarity: 0.3,
        effect: LuckyBreakEffect::Heal(50),
    },
    LuckyBreak {
        text: "You got a raise. A real, permanent raise.",
        rarity: 0.2,
        effect: LuckyBreakEffect::PermanentRaise,
    },
];

/// Occasional narration for the passage of another day on the clock.
pub static DAILY_GRIND: &[&str] = &[
    "Another day on the clock.",
    "Your feet hurt in a new place today.",
    "The calendar on the wall mocks you.",
    "Coffee for breakfast. Again.",
    "You dreamed about spreadsheets.",
];

/// Milestone narrative for a given child age, if one is scripted.
/// `{child}` is substituted with the child's name.
pub fn milestone_for_age(age: u32) -> Option<&'static str> {
    match age {
        6 => Some("{child} started first grade today. You saw the photos online."),
        8 => Some("{child} joined a soccer team. The games are on your work days."),
        10 => Some("Double digits. {child} says they're 'basically a teenager now'."),
        13 => Some("{child} is officially a teenager and answers in one-word texts."),
        16 => Some("{child} got a learner's permit. You weren't in the passenger seat."),
        17 => Some("One more year. {child} is talking about college applications."),
        18 => Some("{child} turned eighteen. It's over. You made it."),
        _ => None,
    }
}
