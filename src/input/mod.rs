//! # Input Module
//!
//! The intent surface between raw input devices and the engine. A front
//! end translates whatever it reads (keys, swipes, taps) into one of these
//! intents; the core validates the shape and silently rejects anything
//! malformed, so bad input can never mutate state.

use crate::game::StairDirection;
use serde::{Deserialize, Serialize};

/// A discrete player intent. One accepted intent advances at most one
/// turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerIntent {
    /// Step one cell; exactly one of dx/dy must be nonzero, each in
    /// {-1, 0, 1}
    Move { dx: i32, dy: i32 },
    /// Use the staircase under the player
    UseStairs(StairDirection),
    /// Throw the run away and start over with the same options
    Restart,
    /// Leave the session; the front end decides what that means
    Quit,
}

impl PlayerIntent {
    /// Checks the structural validity of the intent. Only `Move` carries
    /// data that can be malformed.
    pub fn is_valid(&self) -> bool {
        match *self {
            PlayerIntent::Move { dx, dy } => {
                (-1..=1).contains(&dx) && (-1..=1).contains(&dy) && ((dx == 0) != (dy == 0))
            }
            PlayerIntent::UseStairs(_) | PlayerIntent::Restart | PlayerIntent::Quit => true,
        }
    }
}
