//! Game state and session container
//!
//! `GameState` is the scoreboard the HUD reads. `Session` owns everything one
//! play session needs; a restart builds a fresh one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::clock::Clock;
use super::events::{GameEvent, Timeline};
use super::rhythm::RhythmEngine;
use super::troupe::{build_troupe, player_start};
use crate::hud::HudSnapshot;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Dancing
    Playing,
    /// Out of lives. Terminal until restart.
    GameOver,
}

/// Status line shown above the stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Dancing,
    SteppedOn { lives_left: u8 },
    GameOver,
}

impl Status {
    pub fn message(&self) -> String {
        match self {
            Status::Dancing => "Dance to the same rhythm!".to_string(),
            Status::SteppedOn { lives_left } => {
                format!("You got stepped on! Lives left: {}", lives_left)
            }
            Status::GameOver => "Game over! Reload to play again".to_string(),
        }
    }
}

/// What a confirmed hit did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Hurt { lives_left: u8 },
    Fatal,
    /// Game was already over
    Ignored,
}

/// Lives, score and rhythm for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub lives: u8,
    /// Never decreases; frozen once the game is over
    pub score: f64,
    /// This frame's synchronization, 0-100
    pub rhythm: f32,
    pub phase: GamePhase,
    pub status: Status,
}

impl GameState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            lives: tuning.starting_lives,
            score: 0.0,
            rhythm: 0.0,
            phase: GamePhase::Playing,
            status: Status::Dancing,
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Add to the score while playing
    pub fn add_score(&mut self, amount: f64) {
        if !self.is_game_over() && amount > 0.0 {
            self.score += amount;
        }
    }

    /// Lose a life. Running out ends the game.
    pub fn take_hit(&mut self) -> HitOutcome {
        if self.is_game_over() {
            return HitOutcome::Ignored;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.end_game();
            HitOutcome::Fatal
        } else {
            self.status = Status::SteppedOn {
                lives_left: self.lives,
            };
            HitOutcome::Hurt {
                lives_left: self.lives,
            }
        }
    }

    pub(crate) fn end_game(&mut self) {
        self.phase = GamePhase::GameOver;
        self.status = Status::GameOver;
    }

    /// Back to the default status line (no effect after game over)
    pub fn revert_status(&mut self) -> bool {
        if self.is_game_over() || self.status == Status::Dancing {
            return false;
        }
        self.status = Status::Dancing;
        true
    }
}

/// Everything one play session owns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub tuning: Tuning,
    pub clock: Clock,
    pub rhythm: RhythmEngine,
    pub player: Actor,
    /// Evaluated in order every frame
    pub dancers: Vec<Actor>,
    pub game: GameState,
    pub timeline: Timeline,
    /// Player velocity this frame (x, z); zero when idle or game over
    #[serde(skip)]
    pub player_velocity: Vec2,
}

impl Session {
    /// New session with the default troupe
    pub fn new(tuning: Tuning) -> Self {
        let player = Actor::player(player_start(&tuning));
        let dancers = build_troupe(&tuning);
        Self::with_actors(tuning, player, dancers)
    }

    /// New session with a hand-placed player and crowd
    pub fn with_actors(tuning: Tuning, player: Actor, dancers: Vec<Actor>) -> Self {
        log::info!(
            "Session start: {} lives, {} dancers",
            tuning.starting_lives,
            dancers.len()
        );
        Self {
            rhythm: RhythmEngine::new(&tuning),
            game: GameState::new(&tuning),
            clock: Clock::new(),
            timeline: Timeline::new(),
            player_velocity: Vec2::ZERO,
            player,
            dancers,
            tuning,
        }
    }

    /// Throw everything away, including pending flashes and status reverts
    pub fn restart(&mut self) {
        log::info!("Restarting session");
        *self = Session::new(self.tuning.clone());
    }

    #[inline]
    pub fn now(&self) -> f64 {
        self.clock.elapsed()
    }

    /// Global rhythm phase right now
    #[inline]
    pub fn global_phase(&self) -> f32 {
        self.rhythm.phase_at(self.clock.elapsed())
    }

    pub fn dancer_mut(&mut self, id: u32) -> Option<&mut Actor> {
        self.dancers.iter_mut().find(|d| d.id == id)
    }

    pub fn snapshot(&self) -> HudSnapshot {
        HudSnapshot::from_state(&self.game)
    }

    /// Events since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.timeline.drain_events()
    }
}
