//! Dancer formation and cosmetic variety
//!
//! Dancers stand in evenly spaced rows centered on the floor. Looks (age,
//! skin, clothes, hat) are drawn from a seeded RNG so a seed always produces
//! the same crowd. Looks never feed into hazard math.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use crate::tuning::Tuning;

pub const SKIN_TONES: [u32; 5] = [0xffdbac, 0xf4c2a1, 0xd4a574, 0x8d5524, 0x654321];
pub const CLOTHING_COLORS: [u32; 6] = [0x4a90e2, 0xe24a4a, 0x4ae24a, 0xe2e24a, 0xe24ae2, 0x4ae2e2];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Age {
    Child,
    #[default]
    Adult,
    Elder,
}

impl Age {
    pub const ALL: [Age; 3] = [Age::Child, Age::Adult, Age::Elder];

    /// Body scale for rendering
    pub fn scale(&self) -> f32 {
        match self {
            Age::Child => 0.7,
            Age::Adult => 1.0,
            Age::Elder => 0.9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Hat {
    #[default]
    None,
    Cowboy,
    Cap,
}

impl Hat {
    pub const ALL: [Hat; 3] = [Hat::None, Hat::Cowboy, Hat::Cap];
}

/// How a dancer looks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DancerLook {
    pub age: Age,
    pub skin_tone: u32,
    pub clothing: u32,
    pub hat: Hat,
}

impl Default for DancerLook {
    fn default() -> Self {
        Self {
            age: Age::Adult,
            skin_tone: SKIN_TONES[0],
            clothing: CLOTHING_COLORS[0],
            hat: Hat::None,
        }
    }
}

impl DancerLook {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            age: Age::ALL[rng.random_range(0..Age::ALL.len())],
            skin_tone: SKIN_TONES[rng.random_range(0..SKIN_TONES.len())],
            clothing: CLOTHING_COLORS[rng.random_range(0..CLOTHING_COLORS.len())],
            hat: Hat::ALL[rng.random_range(0..Hat::ALL.len())],
        }
    }
}

/// X of the first column, so the row is centered on the origin
fn first_column_x(tuning: &Tuning) -> f32 {
    -(tuning.dancers_per_row.saturating_sub(1) as f32) * tuning.dancer_spacing / 2.0
}

/// Z of row `row`, rows centered on the origin
fn row_z(row: f32, tuning: &Tuning) -> f32 {
    (row - tuning.rows.saturating_sub(1) as f32 / 2.0) * tuning.row_spacing
}

/// Floor position of the dancer at (row, col)
pub fn slot_position(row: u32, col: u32, tuning: &Tuning) -> Vec3 {
    Vec3::new(
        first_column_x(tuning) + col as f32 * tuning.dancer_spacing,
        0.0,
        row_z(row as f32, tuning),
    )
}

/// Player starts in the middle row, halfway between the two center dancers
pub fn player_start(tuning: &Tuning) -> Vec3 {
    let middle_col = tuning.dancers_per_row.saturating_sub(1) as f32 / 2.0;
    let middle_row = tuning.rows.saturating_sub(1) as f32 / 2.0;
    Vec3::new(
        first_column_x(tuning) + middle_col * tuning.dancer_spacing,
        0.0,
        row_z(middle_row, tuning),
    )
}

/// Build the whole crowd, ids 1.. in row-major order
pub fn build_troupe(tuning: &Tuning) -> Vec<Actor> {
    let mut rng = Pcg32::seed_from_u64(tuning.seed);
    let mut dancers = Vec::with_capacity(tuning.rows.saturating_mul(tuning.dancers_per_row) as usize);

    for row in 0..tuning.rows {
        for col in 0..tuning.dancers_per_row {
            let id = dancers.len() as u32 + 1;
            let look = DancerLook::random(&mut rng);
            dancers.push(Actor::dancer(id, slot_position(row, col, tuning), look));
        }
    }

    log::info!(
        "Troupe ready: {} dancers in {} rows (seed {})",
        dancers.len(),
        tuning.rows,
        tuning.seed
    );
    dancers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_formation() {
        let tuning = Tuning::default();
        let dancers = build_troupe(&tuning);
        assert_eq!(dancers.len(), 30);
        assert_eq!(dancers[0].position, Vec3::new(-6.75, 0.0, -2.5));
        assert_eq!(dancers[9].position, Vec3::new(6.75, 0.0, -2.5));
        assert_eq!(dancers[10].position.z, 0.0);
        assert_eq!(dancers[29].position, Vec3::new(6.75, 0.0, 2.5));
        assert!(dancers.iter().all(|d| d.phase_offset == 0.0));
        let ids: Vec<u32> = dancers.iter().map(|d| d.id).collect();
        assert_eq!(ids, (1..=30).collect::<Vec<_>>());
    }

    #[test]
    fn test_player_starts_between_center_dancers() {
        let tuning = Tuning::default();
        let start = player_start(&tuning);
        assert_eq!(start, Vec3::ZERO);
        let dancers = build_troupe(&tuning);
        assert_eq!(dancers[14].position.x, -0.75);
        assert_eq!(dancers[15].position.x, 0.75);
    }

    #[test]
    fn test_same_seed_same_looks() {
        let tuning = Tuning::default();
        let a: Vec<_> = build_troupe(&tuning).iter().map(|d| d.look).collect();
        let b: Vec<_> = build_troupe(&tuning).iter().map(|d| d.look).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seed_changes_looks_not_positions() {
        let t1 = Tuning::default();
        let t2 = Tuning { seed: 42, ..Tuning::default() };
        let a = build_troupe(&t1);
        let b = build_troupe(&t2);
        assert!(a.iter().zip(&b).all(|(x, y)| x.position == y.position));
        assert!(a.iter().zip(&b).any(|(x, y)| x.look != y.look));
    }

    #[test]
    fn test_age_scales() {
        assert_eq!(Age::Child.scale(), 0.7);
        assert_eq!(Age::Adult.scale(), 1.0);
        assert_eq!(Age::Elder.scale(), 0.9);
        assert_eq!(DancerLook::default().age.scale(), 1.0);
    }

    #[test]
    fn test_empty_troupe() {
        let tuning = Tuning { rows: 0, ..Tuning::default() };
        assert!(build_troupe(&tuning).is_empty());
    }
}
