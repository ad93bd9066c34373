//! Difficulty tiers and per-game tuning
//!
//! Settings are a pure function of the tier and are recomputed on every read.

use serde::{Deserialize, Serialize};

/// Difficulty tier selected in the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
    Grownup,
}

impl Difficulty {
    /// All tiers, easiest first
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Grownup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Grownup => "grownup",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "grownup" | "grown-up" => Some(Difficulty::Grownup),
            _ => None,
        }
    }

    /// Menu label
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Grownup => "Grown-up",
        }
    }

    /// Menu face
    pub fn emoji(&self) -> &'static str {
        match self {
            Difficulty::Easy => "😊",
            Difficulty::Medium => "😄",
            Difficulty::Hard => "😎",
            Difficulty::Grownup => "🧠",
        }
    }

    /// Tuning bundle for this tier
    pub fn settings(&self) -> DifficultySettings {
        settings_for(*self)
    }
}

/// Per-game tuning parameters for one tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultySettings {
    // === Trace ===
    /// Radius of the dots to trace (px)
    pub trace_point_size: f32,
    /// Width of the dashed guide line (px)
    pub trace_line_width: f32,
    /// A dot counts as reached inside this distance (px)
    pub trace_snap_distance: f32,

    // === Match ===
    /// Number of glyph pairs in a deck
    pub match_pairs: usize,
    /// Card edge length (px)
    pub match_card_size: f32,

    // === Path ===
    /// Width of the dashed path (px)
    pub path_width: f32,
    /// Pointer must be this close to the path to move the animal (px)
    pub path_snap_distance: f32,
    /// Fraction of the remaining gap the animal closes per move (capped at 1)
    pub animal_speed: f32,
}

/// Tuning for a difficulty tier
pub fn settings_for(difficulty: Difficulty) -> DifficultySettings {
    match difficulty {
        Difficulty::Easy => DifficultySettings {
            trace_point_size: 20.0,
            trace_line_width: 14.0,
            trace_snap_distance: 45.0,
            match_pairs: 3,
            match_card_size: 140.0,
            path_width: 40.0,
            path_snap_distance: 70.0,
            animal_speed: 1.5,
        },
        Difficulty::Medium => DifficultySettings {
            trace_point_size: 15.0,
            trace_line_width: 10.0,
            trace_snap_distance: 35.0,
            match_pairs: 4,
            match_card_size: 120.0,
            path_width: 30.0,
            path_snap_distance: 55.0,
            animal_speed: 1.2,
        },
        Difficulty::Hard => DifficultySettings {
            trace_point_size: 12.0,
            trace_line_width: 8.0,
            trace_snap_distance: 25.0,
            match_pairs: 6,
            match_card_size: 100.0,
            path_width: 25.0,
            path_snap_distance: 40.0,
            animal_speed: 1.0,
        },
        Difficulty::Grownup => DifficultySettings {
            trace_point_size: 5.0,
            trace_line_width: 3.0,
            trace_snap_distance: 10.0,
            match_pairs: 12,
            match_card_size: 60.0,
            path_width: 10.0,
            path_snap_distance: 15.0,
            animal_speed: 0.7,
        },
    }
}
