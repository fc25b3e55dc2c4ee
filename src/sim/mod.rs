//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only from the simulation clock (timers included)
//! - Seeded RNG only, and only for cosmetics
//! - Stable iteration order (dancers by id)
//! - No rendering or platform dependencies

pub mod actor;
pub mod clock;
pub mod events;
pub mod hazard;
pub mod input;
pub mod movement;
pub mod rhythm;
pub mod state;
pub mod tick;
pub mod troupe;

pub use actor::{Actor, Leg, LegState, Pose, left_leg_lift, right_leg_lift};
pub use clock::Clock;
pub use events::{GameEvent, Scheduled, Timeline};
pub use hazard::{StepCheck, evaluate};
pub use input::{Direction, InputState};
pub use movement::MoveOutcome;
pub use rhythm::{RhythmEngine, sync_score};
pub use state::{GamePhase, GameState, HitOutcome, Session, Status};
pub use tick::{tick, tick_at_host_time};
pub use troupe::{Age, DancerLook, Hat, build_troupe, player_start};
