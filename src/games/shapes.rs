//! Trace shape catalog
//!
//! Points are normalized to the unit square and traced in order.

use glam::Vec2;

use crate::difficulty::Difficulty;

/// A traceable outline
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub name: &'static str,
    pub glyph: &'static str,
    pub tier: Difficulty,
    pub points: &'static [Vec2],
}

const fn p(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

#[rustfmt::skip]
pub static SHAPES: [Shape; 14] = [
    // Easy shapes (fewer points)
    Shape {
        name: "Circle",
        glyph: "🔵",
        tier: Difficulty::Easy,
        points: &[p(0.5, 0.25), p(0.75, 0.5), p(0.5, 0.75), p(0.25, 0.5), p(0.5, 0.25)],
    },
    Shape {
        name: "Square",
        glyph: "🟧",
        tier: Difficulty::Easy,
        points: &[p(0.25, 0.25), p(0.75, 0.25), p(0.75, 0.75), p(0.25, 0.75), p(0.25, 0.25)],
    },
    Shape {
        name: "Triangle",
        glyph: "🔺",
        tier: Difficulty::Easy,
        points: &[p(0.5, 0.2), p(0.8, 0.8), p(0.2, 0.8), p(0.5, 0.2)],
    },
    // Medium shapes
    Shape {
        name: "House",
        glyph: "🏠",
        tier: Difficulty::Medium,
        points: &[
            p(0.25, 0.5),
            p(0.5, 0.25),
            p(0.75, 0.5),
            p(0.75, 0.8),
            p(0.25, 0.8),
            p(0.25, 0.5),
        ],
    },
    Shape {
        name: "Fish",
        glyph: "🐟",
        tier: Difficulty::Medium,
        points: &[
            p(0.2, 0.5),
            p(0.3, 0.35), p(0.5, 0.3), p(0.7, 0.35),
            p(0.8, 0.5),
            p(0.7, 0.65), p(0.5, 0.7), p(0.3, 0.65),
            p(0.2, 0.5),
        ],
    },
    Shape {
        name: "Heart",
        glyph: "❤️",
        tier: Difficulty::Medium,
        points: &[
            p(0.5, 0.8),
            p(0.25, 0.55), p(0.2, 0.35),
            p(0.3, 0.25), p(0.4, 0.28),
            p(0.5, 0.38),
            p(0.6, 0.28), p(0.7, 0.25),
            p(0.8, 0.35), p(0.75, 0.55),
            p(0.5, 0.8),
        ],
    },
    // Hard shapes (more points)
    Shape {
        name: "Cat",
        glyph: "🐱",
        tier: Difficulty::Hard,
        points: &[
            p(0.3, 0.3), p(0.25, 0.2), p(0.3, 0.25),
            p(0.5, 0.25),
            p(0.7, 0.25), p(0.75, 0.2), p(0.7, 0.3),
            p(0.75, 0.5), p(0.7, 0.7),
            p(0.5, 0.75),
            p(0.3, 0.7), p(0.25, 0.5),
            p(0.3, 0.3),
        ],
    },
    Shape {
        name: "Star",
        glyph: "⭐",
        tier: Difficulty::Hard,
        points: &[
            p(0.5, 0.2),
            p(0.4, 0.45), p(0.2, 0.45),
            p(0.35, 0.6), p(0.3, 0.85),
            p(0.5, 0.7),
            p(0.7, 0.85), p(0.65, 0.6),
            p(0.8, 0.45), p(0.6, 0.45),
            p(0.5, 0.2),
        ],
    },
    Shape {
        name: "Butterfly",
        glyph: "🦋",
        tier: Difficulty::Hard,
        points: &[
            p(0.5, 0.3),
            p(0.3, 0.2), p(0.15, 0.35), p(0.2, 0.55),
            p(0.35, 0.5), p(0.5, 0.55),
            p(0.65, 0.5), p(0.8, 0.55),
            p(0.85, 0.35), p(0.7, 0.2),
            p(0.5, 0.3),
            p(0.5, 0.8),
        ],
    },
    // Grown-up shapes (many points, precision required)
    Shape {
        name: "Treble Clef",
        glyph: "🎼",
        tier: Difficulty::Grownup,
        points: &[
            p(0.55, 0.85), p(0.45, 0.8), p(0.4, 0.7),
            p(0.45, 0.6), p(0.55, 0.55), p(0.6, 0.45),
            p(0.55, 0.35), p(0.45, 0.32), p(0.38, 0.38),
            p(0.4, 0.5), p(0.5, 0.55), p(0.55, 0.5),
            p(0.52, 0.4), p(0.5, 0.25), p(0.5, 0.15),
        ],
    },
    Shape {
        name: "Infinity",
        glyph: "♾️",
        tier: Difficulty::Grownup,
        points: &[
            p(0.5, 0.5), p(0.35, 0.35), p(0.2, 0.4),
            p(0.15, 0.5), p(0.2, 0.6), p(0.35, 0.65),
            p(0.5, 0.5), p(0.65, 0.35), p(0.8, 0.4),
            p(0.85, 0.5), p(0.8, 0.6), p(0.65, 0.65),
            p(0.5, 0.5),
        ],
    },
    Shape {
        name: "Dragon",
        glyph: "🐉",
        tier: Difficulty::Grownup,
        points: &[
            p(0.15, 0.4), p(0.2, 0.3), p(0.28, 0.25),
            p(0.35, 0.28), p(0.4, 0.35), p(0.45, 0.3),
            p(0.5, 0.25), p(0.55, 0.3), p(0.58, 0.38),
            p(0.65, 0.35), p(0.72, 0.32), p(0.78, 0.38),
            p(0.82, 0.48), p(0.78, 0.58), p(0.7, 0.62),
            p(0.6, 0.58), p(0.5, 0.6), p(0.4, 0.65),
            p(0.3, 0.62), p(0.22, 0.55), p(0.18, 0.48),
        ],
    },
    Shape {
        name: "Spiral",
        glyph: "🌀",
        tier: Difficulty::Grownup,
        points: &[
            p(0.5, 0.5), p(0.55, 0.45), p(0.58, 0.52),
            p(0.52, 0.58), p(0.42, 0.55), p(0.4, 0.45),
            p(0.48, 0.38), p(0.6, 0.4), p(0.65, 0.52),
            p(0.58, 0.65), p(0.42, 0.68), p(0.3, 0.58),
            p(0.28, 0.42), p(0.38, 0.28), p(0.58, 0.25),
            p(0.72, 0.38), p(0.75, 0.58),
        ],
    },
    Shape {
        name: "Cursive A",
        glyph: "🔤",
        tier: Difficulty::Grownup,
        points: &[
            p(0.25, 0.75), p(0.35, 0.65), p(0.45, 0.45),
            p(0.5, 0.3), p(0.55, 0.35), p(0.58, 0.45),
            p(0.55, 0.55), p(0.48, 0.58), p(0.42, 0.55),
            p(0.45, 0.65), p(0.55, 0.72), p(0.65, 0.7),
            p(0.75, 0.75),
        ],
    },
];

/// Shape tiers offered at each difficulty
pub fn tiers_for(difficulty: Difficulty) -> &'static [Difficulty] {
    match difficulty {
        Difficulty::Easy => &[Difficulty::Easy],
        Difficulty::Medium => &[Difficulty::Easy, Difficulty::Medium],
        Difficulty::Hard => &[Difficulty::Easy, Difficulty::Medium, Difficulty::Hard],
        Difficulty::Grownup => &[Difficulty::Grownup],
    }
}

/// Catalog shapes for a difficulty, in catalog order
pub fn shapes_for(difficulty: Difficulty) -> Vec<&'static Shape> {
    let tiers = tiers_for(difficulty);
    SHAPES.iter().filter(|s| tiers.contains(&s.tier)).collect()
}
