//! Global rhythm and synchronization scoring
//!
//! One phase drives every actor. The player is "in rhythm" when moving, more
//! so near the peaks of the wave.

use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::tuning::Tuning;

/// The shared beat
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RhythmEngine {
    /// Radians per second
    pub speed: f32,
    /// Phase at elapsed zero
    pub origin: f32,
}

impl RhythmEngine {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            speed: tuning.rhythm_speed,
            origin: tuning.rhythm_origin,
        }
    }

    /// Global rhythm phase at `elapsed` seconds
    #[inline]
    pub fn phase_at(&self, elapsed: f64) -> f32 {
        (self.origin as f64 + elapsed * self.speed as f64) as f32
    }

    /// Update `state.rhythm` for this frame and accrue score.
    ///
    /// Score is added per frame, not per second: faster frame rates earn
    /// faster. Returns the rhythm percent; no-op once the game is over.
    pub fn tick(&self, state: &mut GameState, phase: f32, player_speed: f32, tuning: &Tuning) -> f32 {
        if state.is_game_over() {
            return state.rhythm;
        }

        state.rhythm = sync_score(phase, player_speed) * 100.0;
        if state.rhythm > tuning.rhythm_score_gate {
            state.add_score(tuning.score_increment);
        }
        state.rhythm
    }
}

/// How in-sync a player moving at `player_speed` is at `phase`, in [0, 1]
pub fn sync_score(phase: f32, player_speed: f32) -> f32 {
    if player_speed == 0.0 || !player_speed.is_finite() {
        return 0.0;
    }
    (phase.sin().abs() * 0.8 + 0.2).clamp(0.0, 1.0)
}
