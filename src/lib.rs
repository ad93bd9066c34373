//! Animal Fun - mini-games for little hands
//!
//! Core modules:
//! - `games`: Per-game session state machines (trace, pairs, path, free draw, habitat)
//! - `shell`: Menu routing, progress bookkeeping, feedback dispatch
//! - `profile`: Persisted player profile (stars, collection, difficulty)
//! - `difficulty`: Difficulty tiers and their tuning tables
//! - `platform`: Browser/native abstraction (input, storage)
//! - `renderer`: Canvas 2D drawing (WASM only)

pub mod audio;
pub mod celebration;
pub mod difficulty;
pub mod games;
pub mod platform;
pub mod profile;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod share;
pub mod shell;

pub use difficulty::{Difficulty, DifficultySettings, settings_for};
pub use profile::{Profile, ProfileStore};
pub use shell::{Shell, ViewKind};

/// Game timing and layout constants
pub mod consts {
    /// Delay before the next trace shape appears (ms)
    pub const TRACE_ADVANCE_DELAY_MS: f64 = 2000.0;
    /// Minimum spacing between stroke sounds in trace and path (ms)
    pub const DRAW_SOUND_INTERVAL_MS: f64 = 100.0;
    /// Minimum spacing between stroke sounds in free draw (ms)
    pub const FREE_DRAW_SOUND_INTERVAL_MS: f64 = 80.0;

    /// Mismatched cards stay face up this long (ms)
    pub const MATCH_MISMATCH_REVEAL_MS: f64 = 800.0;
    /// Pause between the last pair and the grand celebration (ms)
    pub const MATCH_CELEBRATE_DELAY_MS: f64 = 300.0;
    /// Pause between the grand celebration and a fresh deck (ms)
    pub const MATCH_NEW_DECK_DELAY_MS: f64 = 2000.0;

    /// Delay before the next path level (ms)
    pub const PATH_ADVANCE_DELAY_MS: f64 = 2500.0;
    /// Progress at which the animal counts as home
    pub const PATH_COMPLETE_PROGRESS: f32 = 0.95;
    /// Sampling step along the path when searching for the nearest point
    pub const PATH_SAMPLE_STEP: f32 = 0.02;
    /// How far behind the animal the nearest-point search may look
    pub const PATH_BACKTRACK_WINDOW: f32 = 0.1;

    /// Celebration burst lifetime (ms)
    pub const CELEBRATION_DURATION_MS: f64 = 3000.0;
    /// Point sparkle lifetime (ms)
    pub const POINT_EFFECT_DURATION_MS: f64 = 1500.0;
}

/// Shared colour tables
pub mod colors {
    /// Stroke/dot rainbow used by trace and path
    pub const RAINBOW: [&str; 6] = [
        "#FF6B6B", "#FFA94D", "#FFE066", "#69DB7C", "#74C0FC", "#B197FC",
    ];
    /// Confetti colours
    pub const CONFETTI: [&str; 7] = [
        "#FF6B6B", "#FFA94D", "#FFE066", "#69DB7C", "#74C0FC", "#B197FC", "#F783AC",
    ];
    /// Confirmed trace point
    pub const CONFIRMED: &str = "#69DB7C";
    /// Next-point highlight ring
    pub const HIGHLIGHT: &str = "#FFE066";
    /// Dashed guide line
    pub const GUIDE: &str = "#cccccc";
    /// Free-draw paper
    pub const PAPER: &str = "#FFFFFF";
}
