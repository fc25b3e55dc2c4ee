//! Deferred effects and outgoing events
//!
//! Hit flashes and status-message reverts are scheduled against the
//! simulation clock and resolved at the start of each step. Events for the
//! presentation layer are queued here until the host drains them.

use serde::{Deserialize, Serialize};

/// Something the presentation layer should react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A dancer stepped on the player
    Hit { dancer: u32, lives_left: u8, at: f64 },
    /// Light up a dancer for `duration` seconds
    HitFlash { dancer: u32, start: f64, duration: f64 },
    /// A dancer's flash finished
    FlashEnded { dancer: u32 },
    /// Status text went back to the default
    StatusReverted,
    /// Out of lives
    GameOver { score: f64, at: f64 },
}

/// Deferred effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scheduled {
    FlashEnd { dancer: u32 },
    StatusRevert,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timeline {
    /// (due time, effect), unordered
    pending: Vec<(f64, Scheduled)>,
    emitted: Vec<GameEvent>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at: f64, what: Scheduled) {
        self.pending.push((at, what));
    }

    /// Schedule `what`, dropping any pending copy of it first
    pub fn reschedule(&mut self, at: f64, what: Scheduled) {
        self.cancel(what);
        self.schedule(at, what);
    }

    pub fn cancel(&mut self, what: Scheduled) {
        self.pending.retain(|(_, s)| *s != what);
    }

    pub fn is_pending(&self, what: Scheduled) -> bool {
        self.pending.iter().any(|(_, s)| *s == what)
    }

    /// Remove and return everything due at or before `now`, earliest first
    pub fn take_due(&mut self, now: f64) -> Vec<Scheduled> {
        let mut due: Vec<(f64, Scheduled)> = Vec::new();
        self.pending.retain(|&(at, what)| {
            if at <= now {
                due.push((at, what));
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.0.total_cmp(&b.0));
        due.into_iter().map(|(_, what)| what).collect()
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.emitted.push(event);
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.emitted)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.emitted
    }
}
