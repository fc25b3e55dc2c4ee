//! Simulation clock
//!
//! Elapsed time and per-frame delta. All timers (hit cooldowns, flashes,
//! status reverts) are measured against this clock, never wall time.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_FRAME_DT;

/// Monotonic simulation clock (seconds)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Clock {
    elapsed: f64,
    delta: f32,
    /// Last host timestamp seen by [`Clock::advance_to_host_time`] (ms)
    #[serde(skip)]
    last_host_ms: Option<f64>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `dt` seconds. Negative or non-finite deltas count as zero.
    pub fn advance(&mut self, dt: f32) -> f32 {
        let dt = sanitize_dt(dt);
        self.delta = dt;
        self.elapsed += dt as f64;
        dt
    }

    /// Advance from a host timestamp in milliseconds (e.g. requestAnimationFrame).
    ///
    /// The first call yields a zero delta. Long stalls are clamped to
    /// [`MAX_FRAME_DT`] so a backgrounded tab doesn't teleport the player.
    pub fn advance_to_host_time(&mut self, host_ms: f64) -> f32 {
        let dt = self.host_delta(host_ms);
        self.advance(dt)
    }

    /// Frame delta for a host timestamp, without advancing
    pub fn host_delta(&mut self, host_ms: f64) -> f32 {
        let dt = match self.last_host_ms {
            Some(last) => (((host_ms - last) / 1000.0) as f32).min(MAX_FRAME_DT),
            None => 0.0,
        };
        self.last_host_ms = Some(host_ms);
        sanitize_dt(dt)
    }

    /// Seconds since the session started
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Delta of the most recent advance
    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta
    }
}

fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}
