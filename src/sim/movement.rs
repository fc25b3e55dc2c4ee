//! Player movement from held keys
//!
//! Moves that would leave the dance floor are rejected outright: the player
//! stays put rather than sliding along the edge.

use glam::{Vec2, Vec3};

use super::actor::Actor;
use super::input::InputState;
use crate::consts::BASELINE_FPS;
use crate::tuning::Tuning;

/// Result of one movement step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    /// Per-frame velocity (x, z) the player tried to move with
    pub velocity: Vec2,
    /// Whether the candidate position was inside the floor
    pub accepted: bool,
}

impl MoveOutcome {
    pub const IDLE: MoveOutcome = MoveOutcome {
        velocity: Vec2::ZERO,
        accepted: false,
    };

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Velocity for the held keys, or zero when nothing (or opposing keys) is held
pub fn intent_velocity(input: &InputState, speed: f32) -> Vec2 {
    input.intent().normalize_or_zero() * speed
}

/// Whether a planar point is strictly inside the walkable floor
#[inline]
pub fn inside_floor(x: f32, z: f32, tuning: &Tuning) -> bool {
    (x * x + z * z).sqrt() < tuning.max_player_distance()
}

/// Where the player would be after `dt` seconds at `velocity`
pub fn candidate_position(position: Vec3, velocity: Vec2, dt: f32) -> Vec3 {
    let scale = dt * BASELINE_FPS;
    Vec3::new(
        position.x + velocity.x * scale,
        position.y,
        position.z + velocity.y * scale,
    )
}

/// Move the player for one frame
pub fn step(player: &mut Actor, input: &InputState, dt: f32, tuning: &Tuning) -> MoveOutcome {
    if !(dt.is_finite() && dt > 0.0) {
        return MoveOutcome::IDLE;
    }

    let velocity = intent_velocity(input, tuning.player_speed);
    if velocity == Vec2::ZERO {
        return MoveOutcome::IDLE;
    }

    let candidate = candidate_position(player.position, velocity, dt);
    let accepted = inside_floor(candidate.x, candidate.z, tuning);
    if accepted {
        player.position.x = candidate.x;
        player.position.z = candidate.z;
        player.yaw = velocity.x.atan2(-velocity.y);
    } else {
        log::trace!(
            "Rejected move to ({:.3}, {:.3}): off the floor",
            candidate.x,
            candidate.z
        );
    }

    MoveOutcome { velocity, accepted }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn held(forward: bool, backward: bool, left: bool, right: bool) -> InputState {
        InputState {
            forward,
            backward,
            left,
            right,
        }
    }

    #[test]
    fn test_forward_moves_negative_z() {
        let tuning = Tuning::default();
        let mut player = Actor::player(Vec3::ZERO);
        let outcome = step(&mut player, &held(true, false, false, false), DT, &tuning);
        assert!(outcome.accepted);
        assert!((player.position.z + tuning.player_speed).abs() < 1e-5);
        assert_eq!(player.position.x, 0.0);
        assert!(player.yaw.abs() < 1e-6);
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let tuning = Tuning::default();
        let mut player = Actor::player(Vec3::ZERO);
        let outcome = step(&mut player, &held(true, false, true, false), DT, &tuning);
        assert!((outcome.speed() - tuning.player_speed).abs() < 1e-6);
        let moved = Vec2::new(player.position.x, player.position.z).length();
        assert!((moved - tuning.player_speed).abs() < 1e-5);
    }

    #[test]
    fn test_frame_rate_independent() {
        let tuning = Tuning::default();
        let input = held(false, false, false, true);

        let mut a = Actor::player(Vec3::ZERO);
        for _ in 0..20 {
            step(&mut a, &input, 1.0 / 60.0, &tuning);
        }
        let mut b = Actor::player(Vec3::ZERO);
        for _ in 0..10 {
            step(&mut b, &input, 1.0 / 30.0, &tuning);
        }
        assert!((a.position.x - b.position.x).abs() < 1e-3);
        assert!((a.position.x - 20.0 * tuning.player_speed).abs() < 1e-3);
    }

    #[test]
    fn test_zero_dt_is_no_movement() {
        let tuning = Tuning::default();
        let mut player = Actor::player(Vec3::new(1.0, 0.0, 1.0));
        let outcome = step(&mut player, &held(true, false, false, true), 0.0, &tuning);
        assert_eq!(outcome, MoveOutcome::IDLE);
        assert_eq!(player.position, Vec3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_no_keys_no_velocity() {
        let tuning = Tuning::default();
        let mut player = Actor::player(Vec3::ZERO);
        let outcome = step(&mut player, &InputState::default(), DT, &tuning);
        assert_eq!(outcome.speed(), 0.0);
    }

    #[test]
    fn test_move_just_past_edge_is_rejected() {
        // One 60 Hz frame moves exactly player_speed; start so the candidate
        // lands a hair past the edge.
        let tuning = Tuning::default();
        let edge = tuning.max_player_distance();
        let start_x = edge + 1e-3 - tuning.player_speed;
        let mut player = Actor::player(Vec3::new(start_x, 0.0, 0.0));
        player.yaw = 0.25;
        let before = player.position;

        let outcome = step(&mut player, &held(false, false, false, true), DT, &tuning);
        assert!(!outcome.accepted);
        assert!(outcome.speed() > 0.0);
        assert_eq!(player.position.x.to_bits(), before.x.to_bits());
        assert_eq!(player.position.z.to_bits(), before.z.to_bits());
        assert_eq!(player.yaw, 0.25);
    }

    #[test]
    fn test_exactly_on_edge_is_rejected() {
        let tuning = Tuning::default();
        assert!(!inside_floor(tuning.max_player_distance(), 0.0, &tuning));
        assert!(inside_floor(tuning.max_player_distance() - 1e-3, 0.0, &tuning));
    }

    #[test]
    fn test_no_sliding_along_edge() {
        let tuning = Tuning::default();
        let edge = tuning.max_player_distance();
        let mut player = Actor::player(Vec3::new(edge - 0.05, 0.0, 0.0));
        let before = player.position;
        // Diagonal outward: x component alone would cross, z alone would not
        step(&mut player, &held(true, false, false, true), DT, &tuning);
        assert_eq!(player.position, before);
    }

    proptest! {
        #[test]
        fn prop_player_stays_on_floor(
            moves in proptest::collection::vec((any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()), 1..400),
            dt in 0.001f32..0.1,
        ) {
            let tuning = Tuning::default();
            let mut player = Actor::player(Vec3::ZERO);
            for (f, b, l, r) in moves {
                let before = player.position;
                let outcome = step(&mut player, &held(f, b, l, r), dt, &tuning);
                let dist = Vec2::new(player.position.x, player.position.z).length();
                prop_assert!(dist < tuning.max_player_distance());
                if !outcome.accepted {
                    prop_assert_eq!(player.position, before);
                }
            }
        }
    }
}
