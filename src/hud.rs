//! HUD snapshot
//!
//! What the presentation layer gets after every step. Values are already
//! rounded the way they are displayed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::GameState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudSnapshot {
    pub lives: u8,
    /// Rounded to the nearest percent
    pub rhythm: u32,
    /// Floored
    pub score: u64,
    pub game_over: bool,
    pub status: String,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            lives: state.lives,
            rhythm: state.rhythm.round().clamp(0.0, 100.0) as u32,
            score: state.score.floor().max(0.0) as u64,
            game_over: state.is_game_over(),
            status: state.status.message(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for HudSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Lives: {} | Rhythm: {}% | Score: {}",
            self.lives, self.rhythm, self.score
        )
    }
}
