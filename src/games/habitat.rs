//! Habitat
//!
//! Every collected glyph floats around a little meadow. Positions and
//! velocities are normalized to the canvas; the simulation advances one
//! step per animation frame.

use glam::Vec2;
use rand::Rng;

use super::GameEvent;
use crate::audio::SoundEffect;

const SPAWN_X: (f32, f32) = (0.1, 0.9);
const SPAWN_Y: (f32, f32) = (0.15, 0.7);
const MAX_DRIFT: f32 = 0.001;
const BOUNDS_X: (f32, f32) = (0.08, 0.92);
const BOUNDS_Y: (f32, f32) = (0.1, 0.72);
const BOB_PX: f32 = 5.0;
const TAP_RADIUS: f32 = 0.08;
const TAP_GROW: f32 = 20.0;
const TAP_JUMP: f32 = -0.015;

#[derive(Debug, Clone, PartialEq)]
pub struct HabitatEntity {
    pub glyph: String,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub base_size: f32,
    pub bounce_phase: f32,
    pub bounce_speed: f32,
}

impl HabitatEntity {
    pub fn spawn(glyph: &str, rng: &mut impl Rng) -> Self {
        let base_size = rng.random_range(45.0..60.0);
        Self {
            glyph: glyph.to_string(),
            pos: Vec2::new(
                rng.random_range(SPAWN_X.0..=SPAWN_X.1),
                rng.random_range(SPAWN_Y.0..=SPAWN_Y.1),
            ),
            vel: Vec2::new(
                rng.random_range(-MAX_DRIFT..=MAX_DRIFT),
                rng.random_range(-MAX_DRIFT..=MAX_DRIFT),
            ),
            size: base_size,
            base_size,
            bounce_phase: rng.random_range(0.0..std::f32::consts::TAU),
            bounce_speed: rng.random_range(0.03..0.05),
        }
    }

    fn step(&mut self) {
        self.pos += self.vel;

        if self.pos.x < BOUNDS_X.0 || self.pos.x > BOUNDS_X.1 {
            self.vel.x = -self.vel.x;
            self.pos.x = self.pos.x.clamp(BOUNDS_X.0, BOUNDS_X.1);
        }
        if self.pos.y < BOUNDS_Y.0 || self.pos.y > BOUNDS_Y.1 {
            self.vel.y = -self.vel.y;
            self.pos.y = self.pos.y.clamp(BOUNDS_Y.0, BOUNDS_Y.1);
        }

        self.bounce_phase += self.bounce_speed;
        if self.size > self.base_size {
            self.size = (self.size - 1.0).max(self.base_size);
        }
    }

    /// Vertical float in pixels
    pub fn bob_offset(&self) -> f32 {
        self.bounce_phase.sin() * BOB_PX
    }
}

#[derive(Debug, Clone)]
pub struct Habitat {
    entities: Vec<HabitatEntity>,
    canvas: Vec2,
}

impl Habitat {
    pub fn new(collected: &[String], canvas: Vec2, rng: &mut impl Rng) -> Self {
        let entities = collected
            .iter()
            .map(|glyph| HabitatEntity::spawn(glyph, rng))
            .collect();
        Self { entities, canvas }
    }

    pub fn entities(&self) -> &[HabitatEntity] {
        &self.entities
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Advance one frame
    pub fn step(&mut self) {
        for entity in &mut self.entities {
            entity.step();
        }
    }

    /// Tap at a canvas pixel position; the nearest animal in reach jumps and speaks
    pub fn tap(&mut self, pos: Vec2) -> Vec<GameEvent> {
        if self.canvas.x <= 0.0 || self.canvas.y <= 0.0 {
            return Vec::new();
        }
        let tap = pos / self.canvas;
        let nearest = self
            .entities
            .iter_mut()
            .map(|e| (tap.distance(e.pos), e))
            .filter(|(d, _)| *d < TAP_RADIUS)
            .min_by(|a, b| a.0.total_cmp(&b.0));

        match nearest {
            Some((_, entity)) => {
                entity.size = entity.base_size + TAP_GROW;
                entity.vel.y = TAP_JUMP;
                log::debug!("Tapped {}", entity.glyph);
                vec![GameEvent::Sound(SoundEffect::animal(&entity.glyph))]
            }
            None => Vec::new(),
        }
    }
}
