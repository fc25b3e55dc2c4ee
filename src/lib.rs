//! Rodeo Dance - A rhythm dodging game on a circular dance floor
//!
//! Core modules:
//! - `sim`: Deterministic simulation (rhythm, dancers, stepping hazards, game state)
//! - `tuning`: Data-driven game balance
//! - `hud`: Read-only snapshot handed to the presentation layer

pub mod hud;
pub mod sim;
pub mod tuning;

pub use hud::HudSnapshot;
pub use tuning::Tuning;

use glam::{Vec2, Vec3};

/// Game configuration constants
pub mod consts {
    /// Baseline frame rate that movement speeds are expressed against
    pub const BASELINE_FPS: f32 = 60.0;
    /// Largest frame delta the host clock will hand the sim (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Dance floor dimensions
    pub const ARENA_RADIUS: f32 = 10.0;
    /// Safety margin between the player and the floor edge
    pub const PLAYER_CLEARANCE: f32 = 0.5;

    /// Player movement per 60 Hz frame
    pub const PLAYER_SPEED: f32 = 0.2;

    /// Global rhythm phase advance (radians per second)
    pub const RHYTHM_SPEED: f32 = 1.5;

    /// Leg lift amplitude (arena units)
    pub const LEG_LIFT_AMPLITUDE: f32 = 0.15;
    /// A leg lifted less than this is down and can step on the player
    pub const LEG_LIFT_THRESHOLD: f32 = 0.05;
    /// Lateral offset of each leg from the torso
    pub const LEG_OFFSET: f32 = 0.1;

    /// Collision radii
    pub const PLAYER_RADIUS: f32 = 0.4;
    pub const DANCER_RADIUS: f32 = 0.35;
    pub const STEP_RADIUS: f32 = 0.25;

    /// Seconds before the same dancer can step on the player again
    pub const HIT_COOLDOWN: f64 = 1.0;
    /// Seconds a dancer glows after a hit
    pub const HIT_FLASH_DURATION: f64 = 0.2;
    /// Seconds before the hit message reverts to the default status
    pub const STATUS_REVERT_DELAY: f64 = 2.0;

    /// Lives at session start
    pub const STARTING_LIVES: u8 = 6;
    /// Score added per frame while in rhythm
    pub const SCORE_INCREMENT: f64 = 0.05;
    /// Rhythm percent that must be exceeded to earn score
    pub const RHYTHM_SCORE_GATE: f32 = 50.0;

    /// Dancer drift around their anchor
    pub const DRIFT_X_AMPLITUDE: f32 = 0.2;
    pub const DRIFT_X_FREQUENCY: f32 = 1.3;
    pub const DRIFT_Z_AMPLITUDE: f32 = 0.15;
    pub const DRIFT_Z_FREQUENCY: f32 = 1.1;

    /// Vertical bob amplitude while dancing
    pub const BOB_AMPLITUDE: f32 = 0.05;

    /// Troupe formation
    pub const TROUPE_ROWS: u32 = 3;
    pub const DANCERS_PER_ROW: u32 = 10;
    /// Largest crowd a tuning file may ask for
    pub const MAX_TROUPE_SIZE: u32 = 1024;
    pub const ROW_SPACING: f32 = 2.5;
    pub const DANCER_SPACING: f32 = 1.5;
}

/// Project a 3D position onto the floor plane (x, z)
#[inline]
pub fn planar(pos: Vec3) -> Vec2 {
    Vec2::new(pos.x, pos.z)
}

/// Distance between two positions ignoring height
#[inline]
pub fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    planar(a).distance(planar(b))
}
