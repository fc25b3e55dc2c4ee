//! Held movement keys
//!
//! Written by key-down/key-up callbacks, read once per step by the movement
//! controller. Last write wins.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    /// Map a physical key name (case-insensitive) to a direction
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" | "arrowup" => Some(Direction::Forward),
            "s" | "arrowdown" => Some(Direction::Backward),
            "a" | "arrowleft" => Some(Direction::Left),
            "d" | "arrowright" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Currently held directions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    /// Apply a key event. Returns false if the key isn't a movement key.
    pub fn set_key(&mut self, key: &str, pressed: bool) -> bool {
        match Direction::from_key(key) {
            Some(dir) => {
                self.set(dir, pressed);
                true
            }
            None => false,
        }
    }

    pub fn set(&mut self, dir: Direction, pressed: bool) {
        match dir {
            Direction::Forward => self.forward = pressed,
            Direction::Backward => self.backward = pressed,
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
        }
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        match dir {
            Direction::Forward => self.forward,
            Direction::Backward => self.backward,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Release everything (window lost focus)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Unnormalized planar intent (x, z). Forward is -z.
    pub fn intent(&self) -> Vec2 {
        let mut v = Vec2::ZERO;
        if self.forward {
            v.y -= 1.0;
        }
        if self.backward {
            v.y += 1.0;
        }
        if self.left {
            v.x -= 1.0;
        }
        if self.right {
            v.x += 1.0;
        }
        v
    }
}
