//! Player and dancer kinematics
//!
//! Every actor's legs, arms and bob are a pure function of its effective
//! phase (global rhythm phase + the actor's own offset). Nothing here reads
//! input or touches other actors.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::troupe::DancerLook;
use crate::consts::BOB_AMPLITUDE;
use crate::tuning::Tuning;

/// Left leg lift at `phase`
#[inline]
pub fn left_leg_lift(phase: f32, amplitude: f32) -> f32 {
    phase.sin().max(0.0) * amplitude
}

/// Right leg lift at `phase` (half a cycle behind the left)
#[inline]
pub fn right_leg_lift(phase: f32, amplitude: f32) -> f32 {
    (-phase.sin()).max(0.0) * amplitude
}

/// Which leg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Leg {
    Left,
    Right,
}

/// Lifted flags for both legs. A leg that isn't lifted is down and can step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegState {
    pub left_lifted: bool,
    pub right_lifted: bool,
}

impl LegState {
    pub fn from_phase(phase: f32, amplitude: f32, threshold: f32) -> Self {
        Self {
            left_lifted: left_leg_lift(phase, amplitude) > threshold,
            right_lifted: right_leg_lift(phase, amplitude) > threshold,
        }
    }

    #[inline]
    pub fn is_down(&self, leg: Leg) -> bool {
        match leg {
            Leg::Left => !self.left_lifted,
            Leg::Right => !self.right_lifted,
        }
    }

    /// At least one foot on the floor
    #[inline]
    pub fn is_stepping(&self) -> bool {
        !self.left_lifted || !self.right_lifted
    }
}

/// Cosmetic animation outputs. No gameplay reads these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Arm rotations (x, z)
    pub left_arm: Vec2,
    pub right_arm: Vec2,
    /// Leg swing around x
    pub left_leg_swing: f32,
    pub right_leg_swing: f32,
    /// Leg lift heights
    pub left_leg_lift: f32,
    pub right_leg_lift: f32,
    /// Torso tilt (z, x)
    pub body_tilt: Vec2,
    pub bob: f32,
}

impl Pose {
    pub fn from_phase(phase: f32, lift_amplitude: f32) -> Self {
        let s = phase.sin();
        let s11 = (phase * 1.1).sin();
        Self {
            left_arm: Vec2::new(s * 0.6, s11 * 0.4),
            right_arm: Vec2::new(-s * 0.6, -s11 * 0.4),
            left_leg_swing: s * 0.4,
            right_leg_swing: -s * 0.4,
            left_leg_lift: left_leg_lift(phase, lift_amplitude),
            right_leg_lift: right_leg_lift(phase, lift_amplitude),
            body_tilt: Vec2::new((phase * 0.9).sin() * 0.08, (phase * 0.7).sin() * 0.04),
            bob: s.abs() * BOB_AMPLITUDE,
        }
    }
}

/// The player or one dancer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: u32,
    /// y is cosmetic bob, x/z are floor position
    pub position: Vec3,
    /// Added to the global rhythm phase
    pub phase_offset: f32,
    /// Drift anchor, captured from the first observed position (dancers only)
    pub base_position: Option<Vec2>,
    pub legs: LegState,
    pub pose: Pose,
    /// Facing (radians around y)
    pub yaw: f32,
    /// Can't step on the player again until the clock passes this
    pub hit_cooldown_until: Option<f64>,
    /// Glowing from a hit until this time
    pub flash_until: Option<f64>,
    /// None for the player
    pub look: Option<DancerLook>,
}

impl Actor {
    pub fn player(position: Vec3) -> Self {
        Self {
            id: 0,
            position,
            phase_offset: 0.0,
            base_position: None,
            legs: LegState::default(),
            pose: Pose::default(),
            yaw: 0.0,
            hit_cooldown_until: None,
            flash_until: None,
            look: None,
        }
    }

    pub fn dancer(id: u32, position: Vec3, look: DancerLook) -> Self {
        Self {
            id,
            look: Some(look),
            ..Self::player(position)
        }
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        self.look.is_none()
    }

    /// Global phase plus this actor's offset
    #[inline]
    pub fn effective_phase(&self, global_phase: f32) -> f32 {
        global_phase + self.phase_offset
    }

    /// Recompute pose, legs, bob and (for dancers) drift from the global phase
    pub fn advance(&mut self, global_phase: f32, tuning: &Tuning) {
        let phase = self.effective_phase(global_phase);

        self.pose = Pose::from_phase(phase, tuning.leg_lift_amplitude);
        self.legs = LegState::from_phase(phase, tuning.leg_lift_amplitude, tuning.leg_lift_threshold);
        self.position.y = self.pose.bob;

        if !self.is_player() {
            let base = *self
                .base_position
                .get_or_insert(Vec2::new(self.position.x, self.position.z));
            self.position.x = base.x + (phase * tuning.drift_x_frequency).sin() * tuning.drift_x_amplitude;
            self.position.z = base.y + (phase * tuning.drift_z_frequency).cos() * tuning.drift_z_amplitude;
        }
    }

    /// World position of a foot, at torso height
    #[inline]
    pub fn leg_position(&self, leg: Leg, offset: f32) -> Vec3 {
        let dx = match leg {
            Leg::Left => -offset,
            Leg::Right => offset,
        };
        self.position + Vec3::new(dx, 0.0, 0.0)
    }

    /// Cooldown has lapsed (or never started)
    #[inline]
    pub fn can_hit(&self, now: f64) -> bool {
        self.hit_cooldown_until.is_none_or(|until| until < now)
    }

    #[inline]
    pub fn is_flashing(&self, now: f64) -> bool {
        self.flash_until.is_some_and(|until| now < until)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::troupe::DancerLook;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    const AMP: f32 = 0.15;
    const THRESHOLD: f32 = 0.05;

    #[test]
    fn test_legs_alternate() {
        let up = LegState::from_phase(FRAC_PI_2, AMP, THRESHOLD);
        assert!(up.left_lifted);
        assert!(!up.right_lifted);

        let down = LegState::from_phase(-FRAC_PI_2, AMP, THRESHOLD);
        assert!(!down.left_lifted);
        assert!(down.right_lifted);

        let flat = LegState::from_phase(0.0, AMP, THRESHOLD);
        assert!(!flat.left_lifted && !flat.right_lifted);
    }

    #[test]
    fn test_someone_is_always_stepping() {
        for i in 0..1000 {
            let phase = i as f32 / 1000.0 * TAU;
            assert!(LegState::from_phase(phase, AMP, THRESHOLD).is_stepping());
        }
    }

    #[test]
    fn test_one_lift_and_one_drop_per_cycle() {
        let samples = 20_000;
        let mut left_edges = Vec::new();
        let mut right_edges = Vec::new();
        let mut prev = LegState::from_phase(0.0, AMP, THRESHOLD);
        for i in 1..samples {
            let phase = i as f32 / samples as f32 * TAU;
            let legs = LegState::from_phase(phase, AMP, THRESHOLD);
            if legs.left_lifted != prev.left_lifted {
                left_edges.push(phase);
            }
            if legs.right_lifted != prev.right_lifted {
                right_edges.push(phase);
            }
            prev = legs;
        }
        assert_eq!(left_edges.len(), 2);
        assert_eq!(right_edges.len(), 2);
        // Left lifts and drops in the first half, right in the second
        assert!(left_edges[0] < FRAC_PI_2 && left_edges[1] > FRAC_PI_2 && left_edges[1] < PI);
        assert!(right_edges[0] > PI && right_edges[0] < PI + FRAC_PI_2);
        assert!(right_edges[1] > PI + FRAC_PI_2);
    }

    #[test]
    fn test_dancer_drifts_around_anchor() {
        let tuning = Tuning::default();
        let mut dancer = Actor::dancer(1, Vec3::new(3.0, 0.0, -2.5), DancerLook::default());
        for i in 0..200 {
            dancer.advance(i as f32 * 0.1, &tuning);
            let base = dancer.base_position.unwrap();
            assert_eq!(base, Vec2::new(3.0, -2.5));
            assert!((dancer.position.x - base.x).abs() <= tuning.drift_x_amplitude + 1e-6);
            assert!((dancer.position.z - base.y).abs() <= tuning.drift_z_amplitude + 1e-6);
        }
    }

    #[test]
    fn test_anchor_on_origin_is_kept() {
        let tuning = Tuning::default();
        let mut dancer = Actor::dancer(1, Vec3::ZERO, DancerLook::default());
        dancer.advance(1.0, &tuning);
        dancer.advance(2.0, &tuning);
        assert_eq!(dancer.base_position, Some(Vec2::ZERO));
        let expected_z = (2.0f32 * tuning.drift_z_frequency).cos() * tuning.drift_z_amplitude;
        assert!((dancer.position.z - expected_z).abs() < 1e-6);
    }

    #[test]
    fn test_player_is_never_drifted() {
        let tuning = Tuning::default();
        let mut player = Actor::player(Vec3::new(1.0, 0.0, 2.0));
        player.advance(0.7, &tuning);
        assert_eq!(player.position.x, 1.0);
        assert_eq!(player.position.z, 2.0);
        assert!(player.base_position.is_none());
    }

    #[test]
    fn test_cooldown_is_strict() {
        let mut dancer = Actor::dancer(1, Vec3::ZERO, DancerLook::default());
        assert!(dancer.can_hit(0.0));
        dancer.hit_cooldown_until = Some(1.0);
        assert!(!dancer.can_hit(0.5));
        assert!(!dancer.can_hit(1.0));
        assert!(dancer.can_hit(1.001));
    }

    proptest! {
        #[test]
        fn prop_down_iff_lift_at_most_threshold(phase in 0.0f32..TAU) {
            let legs = LegState::from_phase(phase, AMP, THRESHOLD);
            prop_assert_eq!(legs.is_down(Leg::Left), left_leg_lift(phase, AMP) <= THRESHOLD);
            prop_assert_eq!(legs.is_down(Leg::Right), right_leg_lift(phase, AMP) <= THRESHOLD);
        }

        #[test]
        fn prop_legs_depend_only_on_phase(phase in -100.0f32..100.0, offset in -10.0f32..10.0) {
            let tuning = Tuning::default();
            let mut a = Actor::dancer(1, Vec3::new(2.0, 0.0, 1.0), DancerLook::default());
            let mut b = Actor::dancer(2, Vec3::new(-4.0, 0.0, 3.0), DancerLook::default());
            a.phase_offset = offset;
            b.phase_offset = 0.0;
            a.advance(phase, &tuning);
            b.advance(phase + offset, &tuning);
            prop_assert_eq!(a.legs, b.legs);
        }
    }
}
