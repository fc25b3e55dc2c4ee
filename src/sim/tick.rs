//! Per-frame simulation step
//!
//! Order each frame: clock, due timers, player movement, dance poses,
//! stepping hazards, rhythm score.

use glam::Vec2;

use super::events::{GameEvent, Scheduled};
use super::hazard::{self, StepCheck};
use super::input::InputState;
use super::movement;
use super::state::Session;

/// Advance the session by one frame of `dt` seconds
pub fn tick(session: &mut Session, input: &InputState, dt: f32) -> Vec<StepCheck> {
    let dt = session.clock.advance(dt);
    let now = session.clock.elapsed();

    resolve_due(session, now);

    if session.game.is_game_over() {
        session.player_velocity = Vec2::ZERO;
        return Vec::new();
    }

    let phase = session.global_phase();
    let tuning = &session.tuning;

    let outcome = movement::step(&mut session.player, input, dt, tuning);
    session.player_velocity = outcome.velocity;

    session.player.advance(phase, tuning);
    for dancer in session.dancers.iter_mut() {
        dancer.advance(phase, tuning);
    }

    let checks = hazard::evaluate(
        &mut session.game,
        &mut session.timeline,
        &session.player,
        &mut session.dancers,
        now,
        tuning,
    );

    session
        .rhythm
        .tick(&mut session.game, phase, outcome.speed(), tuning);

    checks
}

/// Advance from a host frame timestamp in milliseconds
pub fn tick_at_host_time(session: &mut Session, input: &InputState, host_ms: f64) -> Vec<StepCheck> {
    let dt = session.clock.host_delta(host_ms);
    tick(session, input, dt)
}

/// Fire timers that came due. Runs even after game over so flashes finish.
fn resolve_due(session: &mut Session, now: f64) {
    for due in session.timeline.take_due(now) {
        match due {
            Scheduled::FlashEnd { dancer } => {
                // A later hit may have extended the flash past this timer
                let Some(d) = session.dancer_mut(dancer) else {
                    continue;
                };
                if d.flash_until.is_some_and(|until| until <= now) {
                    d.flash_until = None;
                    session.timeline.emit(GameEvent::FlashEnded { dancer });
                }
            }
            Scheduled::StatusRevert => {
                if session.game.revert_status() {
                    session.timeline.emit(GameEvent::StatusReverted);
                }
            }
        }
    }
}
