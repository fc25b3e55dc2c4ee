//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so a session can be
//! reconfigured from JSON without touching code. Defaults come from
//! [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Gameplay tuning for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Seed for cosmetic troupe attributes
    pub seed: u64,

    // === Arena ===
    pub arena_radius: f32,
    pub player_clearance: f32,

    // === Movement ===
    /// Distance per 60 Hz frame
    pub player_speed: f32,

    // === Rhythm ===
    /// Radians of global phase per second
    pub rhythm_speed: f32,
    /// Global phase at elapsed time zero
    pub rhythm_origin: f32,
    /// Score added per frame while rhythm is above the gate
    pub score_increment: f64,
    /// Rhythm percent that must be exceeded to earn score
    pub rhythm_score_gate: f32,

    // === Legs ===
    pub leg_lift_amplitude: f32,
    pub leg_lift_threshold: f32,
    pub leg_offset: f32,

    // === Hazards ===
    pub player_radius: f32,
    pub dancer_radius: f32,
    pub step_radius: f32,
    /// Seconds
    pub hit_cooldown: f64,
    /// Seconds
    pub hit_flash_duration: f64,
    /// Seconds
    pub status_revert_delay: f64,
    pub starting_lives: u8,

    // === Dancer drift ===
    pub drift_x_amplitude: f32,
    pub drift_x_frequency: f32,
    pub drift_z_amplitude: f32,
    pub drift_z_frequency: f32,

    // === Formation ===
    pub rows: u32,
    pub dancers_per_row: u32,
    pub row_spacing: f32,
    pub dancer_spacing: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            seed: 0x5EED_DA2C,

            arena_radius: ARENA_RADIUS,
            player_clearance: PLAYER_CLEARANCE,

            player_speed: PLAYER_SPEED,

            rhythm_speed: RHYTHM_SPEED,
            rhythm_origin: 0.0,
            score_increment: SCORE_INCREMENT,
            rhythm_score_gate: RHYTHM_SCORE_GATE,

            leg_lift_amplitude: LEG_LIFT_AMPLITUDE,
            leg_lift_threshold: LEG_LIFT_THRESHOLD,
            leg_offset: LEG_OFFSET,

            player_radius: PLAYER_RADIUS,
            dancer_radius: DANCER_RADIUS,
            step_radius: STEP_RADIUS,
            hit_cooldown: HIT_COOLDOWN,
            hit_flash_duration: HIT_FLASH_DURATION,
            status_revert_delay: STATUS_REVERT_DELAY,
            starting_lives: STARTING_LIVES,

            drift_x_amplitude: DRIFT_X_AMPLITUDE,
            drift_x_frequency: DRIFT_X_FREQUENCY,
            drift_z_amplitude: DRIFT_Z_AMPLITUDE,
            drift_z_frequency: DRIFT_Z_FREQUENCY,

            rows: TROUPE_ROWS,
            dancers_per_row: DANCERS_PER_ROW,
            row_spacing: ROW_SPACING,
            dancer_spacing: DANCER_SPACING,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.validate())
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Tuning with the global rhythm frozen at `phase`
    pub fn frozen_rhythm(phase: f32) -> Self {
        Self {
            rhythm_speed: 0.0,
            rhythm_origin: phase,
            ..Self::default()
        }
    }

    /// Replace values the simulation cannot work with by their defaults
    pub fn validate(mut self) -> Self {
        let defaults = Self::default();

        fn fix_f32(name: &str, value: &mut f32, fallback: f32, allow_zero: bool) {
            let bad = !value.is_finite() || *value < 0.0 || (!allow_zero && *value == 0.0);
            if bad {
                log::warn!("Tuning: invalid {} ({}), using {}", name, value, fallback);
                *value = fallback;
            }
        }

        fn fix_f64(name: &str, value: &mut f64, fallback: f64) {
            if !value.is_finite() || *value < 0.0 {
                log::warn!("Tuning: invalid {} ({}), using {}", name, value, fallback);
                *value = fallback;
            }
        }

        fix_f32("arena_radius", &mut self.arena_radius, defaults.arena_radius, false);
        fix_f32("player_clearance", &mut self.player_clearance, defaults.player_clearance, true);
        fix_f32("player_speed", &mut self.player_speed, defaults.player_speed, true);
        fix_f32("rhythm_speed", &mut self.rhythm_speed, defaults.rhythm_speed, true);
        fix_f32("leg_lift_amplitude", &mut self.leg_lift_amplitude, defaults.leg_lift_amplitude, true);
        fix_f32("leg_lift_threshold", &mut self.leg_lift_threshold, defaults.leg_lift_threshold, true);
        fix_f32("leg_offset", &mut self.leg_offset, defaults.leg_offset, true);
        fix_f32("player_radius", &mut self.player_radius, defaults.player_radius, true);
        fix_f32("dancer_radius", &mut self.dancer_radius, defaults.dancer_radius, true);
        fix_f32("step_radius", &mut self.step_radius, defaults.step_radius, true);
        fix_f32("row_spacing", &mut self.row_spacing, defaults.row_spacing, true);
        fix_f32("dancer_spacing", &mut self.dancer_spacing, defaults.dancer_spacing, true);

        fix_f64("hit_cooldown", &mut self.hit_cooldown, defaults.hit_cooldown);
        fix_f64("hit_flash_duration", &mut self.hit_flash_duration, defaults.hit_flash_duration);
        fix_f64("status_revert_delay", &mut self.status_revert_delay, defaults.status_revert_delay);
        fix_f64("score_increment", &mut self.score_increment, defaults.score_increment);

        if !self.rhythm_origin.is_finite() {
            log::warn!("Tuning: invalid rhythm_origin, using {}", defaults.rhythm_origin);
            self.rhythm_origin = defaults.rhythm_origin;
        }
        if !self.rhythm_score_gate.is_finite() {
            log::warn!("Tuning: invalid rhythm_score_gate, using {}", defaults.rhythm_score_gate);
            self.rhythm_score_gate = defaults.rhythm_score_gate;
        }
        if self.starting_lives == 0 {
            log::warn!("Tuning: starting_lives must be positive, using {}", defaults.starting_lives);
            self.starting_lives = defaults.starting_lives;
        }
        if self.rows.saturating_mul(self.dancers_per_row) > MAX_TROUPE_SIZE {
            log::warn!(
                "Tuning: {}x{} troupe exceeds {} dancers, using {}x{}",
                self.rows,
                self.dancers_per_row,
                MAX_TROUPE_SIZE,
                defaults.rows,
                defaults.dancers_per_row
            );
            self.rows = defaults.rows;
            self.dancers_per_row = defaults.dancers_per_row;
        }
        if self.player_clearance >= self.arena_radius {
            log::warn!("Tuning: clearance swallows the whole floor, using defaults");
            self.arena_radius = defaults.arena_radius;
            self.player_clearance = defaults.player_clearance;
        }

        self
    }

    /// Largest distance from the floor center the player may stand at (exclusive)
    #[inline]
    pub fn max_player_distance(&self) -> f32 {
        self.arena_radius - self.player_clearance
    }
}
