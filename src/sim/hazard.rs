//! Stepping hazard detection
//!
//! A dancer can step on the player when the player is close to the dancer
//! (broad check) and close to one of the dancer's feet that is on the floor
//! (narrow check). Each dancer has its own cooldown, so two different dancers
//! can land on the player in the same frame.

use serde::{Deserialize, Serialize};

use super::actor::{Actor, Leg};
use super::events::{GameEvent, Scheduled, Timeline};
use super::state::{GameState, HitOutcome};
use crate::planar_distance;
use crate::tuning::Tuning;

/// Per-dancer result for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepCheck {
    pub dancer: u32,
    /// Passed the broad check
    pub candidate: bool,
    /// The down foot the player is under, if any
    pub stepping_leg: Option<Leg>,
    /// A life was taken
    pub hit: bool,
}

/// Broad check: bodies overlap on the floor plane
#[inline]
pub fn is_candidate(player: &Actor, dancer: &Actor, tuning: &Tuning) -> bool {
    planar_distance(player.position, dancer.position) < tuning.player_radius + tuning.dancer_radius
}

/// Narrow check: first down foot within step radius of the player
pub fn stepping_leg(player: &Actor, dancer: &Actor, tuning: &Tuning) -> Option<Leg> {
    if !dancer.legs.is_stepping() {
        return None;
    }
    [Leg::Left, Leg::Right].into_iter().find(|&leg| {
        dancer.legs.is_down(leg)
            && player
                .position
                .distance(dancer.leg_position(leg, tuning.leg_offset))
                < tuning.step_radius
    })
}

/// Check every dancer against the player and apply hits.
///
/// Confirmed hits cost a life, start the dancer's cooldown and flash, and
/// update the status line. Stops as soon as the game ends.
pub fn evaluate(
    state: &mut GameState,
    timeline: &mut Timeline,
    player: &Actor,
    dancers: &mut [Actor],
    now: f64,
    tuning: &Tuning,
) -> Vec<StepCheck> {
    let mut checks = Vec::with_capacity(dancers.len());
    if state.is_game_over() {
        return checks;
    }

    for dancer in dancers.iter_mut() {
        let candidate = is_candidate(player, dancer, tuning);
        let leg = if candidate {
            stepping_leg(player, dancer, tuning)
        } else {
            None
        };
        let hit = leg.is_some() && dancer.can_hit(now);

        if hit {
            apply_hit(state, timeline, dancer, now, tuning);
        }

        checks.push(StepCheck {
            dancer: dancer.id,
            candidate,
            stepping_leg: leg,
            hit,
        });

        if state.is_game_over() {
            break;
        }
    }

    checks
}

fn apply_hit(state: &mut GameState, timeline: &mut Timeline, dancer: &mut Actor, now: f64, tuning: &Tuning) {
    let outcome = state.take_hit();
    if outcome == HitOutcome::Ignored {
        return;
    }

    dancer.hit_cooldown_until = Some(now + tuning.hit_cooldown);
    dancer.flash_until = Some(now + tuning.hit_flash_duration);
    timeline.emit(GameEvent::HitFlash {
        dancer: dancer.id,
        start: now,
        duration: tuning.hit_flash_duration,
    });
    timeline.schedule(
        now + tuning.hit_flash_duration,
        Scheduled::FlashEnd { dancer: dancer.id },
    );
    timeline.emit(GameEvent::Hit {
        dancer: dancer.id,
        lives_left: state.lives,
        at: now,
    });

    match outcome {
        HitOutcome::Fatal => {
            // Terminal message must outlive any earlier hit message
            timeline.cancel(Scheduled::StatusRevert);
            timeline.emit(GameEvent::GameOver {
                score: state.score,
                at: now,
            });
            log::info!("Game over at {:.2}s, score {:.0}", now, state.score.floor());
        }
        HitOutcome::Hurt { lives_left } => {
            timeline.reschedule(now + tuning.status_revert_delay, Scheduled::StatusRevert);
            log::info!("Dancer {} stepped on the player, {} lives left", dancer.id, lives_left);
        }
        HitOutcome::Ignored => {}
    }
}
