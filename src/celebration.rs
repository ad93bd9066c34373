//! Celebration overlay - confetti and stars!
//!
//! Fire-and-forget bursts. Each burst expires on its own after a fixed
//! lifetime; the renderer only ever sees live pieces.

use glam::Vec2;
use rand::Rng;

use crate::colors::CONFETTI;
use crate::consts::{CELEBRATION_DURATION_MS, POINT_EFFECT_DURATION_MS};

/// Confetti pieces per celebration
pub const CONFETTI_COUNT: usize = 50;
/// Star bursts per celebration
pub const STAR_COUNT: usize = 8;
/// Sparkles per point effect
pub const SPARKLE_COUNT: usize = 5;

/// What a piece looks like
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PieceKind {
    /// Falling paper square or circle
    Confetti { color: &'static str, round: bool },
    /// Pulsing ⭐
    Star,
    /// Small ✨ around a point
    Sparkle,
}

/// One animated piece
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Piece {
    pub kind: PieceKind,
    /// Confetti/stars: fraction of the viewport. Sparkles: pixels.
    pub origin: Vec2,
    /// Start offset within the burst (ms)
    pub delay: f64,
}

#[derive(Debug, Clone)]
struct Burst {
    started_at: f64,
    duration: f64,
    pieces: Vec<Piece>,
}

/// A piece as it should be drawn right now
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LivePiece {
    pub piece: Piece,
    /// 0.0 (just started) to 1.0 (about to disappear)
    pub t: f32,
}

/// All active bursts
#[derive(Debug, Clone, Default)]
pub struct Celebration {
    bursts: Vec<Burst>,
}

impl Celebration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full-screen confetti and star burst
    pub fn trigger_celebration(&mut self, now: f64, rng: &mut impl Rng) {
        let mut pieces = Vec::with_capacity(CONFETTI_COUNT + STAR_COUNT);
        for _ in 0..CONFETTI_COUNT {
            pieces.push(Piece {
                kind: PieceKind::Confetti {
                    color: CONFETTI[rng.random_range(0..CONFETTI.len())],
                    round: rng.random_bool(0.5),
                },
                origin: Vec2::new(rng.random::<f32>(), 0.0),
                delay: rng.random::<f64>() * 500.0,
            });
        }
        for _ in 0..STAR_COUNT {
            pieces.push(Piece {
                kind: PieceKind::Star,
                origin: Vec2::new(
                    0.1 + rng.random::<f32>() * 0.8,
                    0.1 + rng.random::<f32>() * 0.8,
                ),
                delay: rng.random::<f64>() * 300.0,
            });
        }
        self.bursts.push(Burst {
            started_at: now,
            duration: CELEBRATION_DURATION_MS,
            pieces,
        });
    }

    /// A few sparkles around a point (pixels)
    pub fn trigger_point_effect(&mut self, at: Vec2, now: f64, rng: &mut impl Rng) {
        let pieces = (0..SPARKLE_COUNT)
            .map(|i| Piece {
                kind: PieceKind::Sparkle,
                origin: at
                    + Vec2::new(
                        (rng.random::<f32>() - 0.5) * 100.0,
                        (rng.random::<f32>() - 0.5) * 100.0,
                    ),
                delay: i as f64 * 100.0,
            })
            .collect();
        self.bursts.push(Burst {
            started_at: now,
            duration: POINT_EFFECT_DURATION_MS,
            pieces,
        });
    }

    /// Drop expired bursts
    pub fn prune(&mut self, now: f64) {
        self.bursts.retain(|b| now - b.started_at < b.duration);
    }

    pub fn is_active(&self) -> bool {
        !self.bursts.is_empty()
    }

    /// Pieces visible at `now`, with their animation progress
    pub fn live_pieces(&self, now: f64) -> Vec<LivePiece> {
        let mut out = Vec::new();
        for burst in &self.bursts {
            let elapsed = now - burst.started_at;
            for piece in &burst.pieces {
                let local = elapsed - piece.delay;
                let span = burst.duration - piece.delay;
                if local < 0.0 || span <= 0.0 || local >= span {
                    continue;
                }
                out.push(LivePiece {
                    piece: *piece,
                    t: (local / span) as f32,
                });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_celebration_piece_counts() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut c = Celebration::new();
        c.trigger_celebration(0.0, &mut rng);
        // Everything has started by 600ms
        let live = c.live_pieces(600.0);
        let stars = live.iter().filter(|p| p.piece.kind == PieceKind::Star).count();
        assert_eq!(stars, STAR_COUNT);
        assert_eq!(live.len(), CONFETTI_COUNT + STAR_COUNT);
    }

    #[test]
    fn test_bursts_expire() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut c = Celebration::new();
        c.trigger_point_effect(Vec2::new(100.0, 100.0), 0.0, &mut rng);
        c.trigger_celebration(1000.0, &mut rng);

        c.prune(POINT_EFFECT_DURATION_MS + 1.0);
        assert!(c.is_active());
        assert!(c.live_pieces(POINT_EFFECT_DURATION_MS + 1.0)
            .iter()
            .all(|p| p.piece.kind != PieceKind::Sparkle));

        c.prune(1000.0 + CELEBRATION_DURATION_MS);
        assert!(!c.is_active());
    }

    #[test]
    fn test_sparkles_stay_near_point() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut c = Celebration::new();
        let at = Vec2::new(200.0, 150.0);
        c.trigger_point_effect(at, 0.0, &mut rng);
        for p in c.live_pieces(450.0) {
            assert!(p.piece.origin.distance(at) <= 50.0 * std::f32::consts::SQRT_2 + 0.01);
            assert!((0.0..1.0).contains(&p.t));
        }
    }
}
