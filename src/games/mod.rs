//! Game sessions
//!
//! Every game is a plain state machine driven by pointer input and a clock.
//! Sessions never touch the profile, audio or DOM directly: they return
//! `GameEvent`s and the shell decides what to do with them. No rendering or
//! platform dependencies live here.

pub mod free_draw;
pub mod habitat;
pub mod pairs;
pub mod path;
pub mod schedule;
pub mod shapes;
pub mod trace;

pub use free_draw::{BrushOp, FreeDrawGame};
pub use habitat::{Habitat, HabitatEntity};
pub use pairs::{Card, MatchGame};
pub use path::{PathGame, PathLevel};
pub use schedule::Timers;
pub use shapes::Shape;
pub use trace::TraceGame;

use glam::Vec2;
use rand::Rng;

use crate::audio::SoundEffect;
use crate::profile::TrackedGame;

/// Something a game wants the outside world to know
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Play a cue
    Sound(SoundEffect),
    /// Full-screen confetti
    Celebrate,
    /// Sparkles at a canvas position (px)
    PointEffect(Vec2),
    /// Add one star to the profile
    StarEarned,
    /// Bump a completion counter
    Completed(TrackedGame),
    /// Add a glyph to the collection
    Collected(String),
    /// Export the free-draw canvas
    SaveDrawing,
}

/// In-place Fisher-Yates shuffle
pub fn shuffle<T>(items: &mut [T], rng: &mut impl Rng) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Emits `Draw` no more often than `interval` ms
#[derive(Debug, Clone)]
pub(crate) struct SoundThrottle {
    interval: f64,
    last: Option<f64>,
}

impl SoundThrottle {
    pub(crate) fn new(interval: f64) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// True if a sound may play at `now` (and records it)
    pub(crate) fn ready(&mut self, now: f64) -> bool {
        match self.last {
            Some(last) if now - last <= self.interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}
