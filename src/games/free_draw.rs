//! Free draw
//!
//! The paint surface keeps everything drawn so far, so the session never
//! stores pixels. It only queues brush operations for the renderer to apply.

use glam::Vec2;

use super::{GameEvent, SoundThrottle};
use crate::audio::SoundEffect;
use crate::colors::PAPER;
use crate::consts::FREE_DRAW_SOUND_INTERVAL_MS;
use crate::platform::{PointerInput, PointerPhase};

pub const PALETTE: [&str; 9] = [
    "#FF6B6B", // red
    "#FFA94D", // orange
    "#FFE066", // yellow
    "#69DB7C", // green
    "#74C0FC", // blue
    "#B197FC", // purple
    "#F783AC", // pink
    PAPER,     // eraser
    "#333333", // black
];

pub const BRUSH_SIZE: f32 = 12.0;
pub const ERASER_SIZE: f32 = 30.0;

/// A paint operation, in canvas pixels
#[derive(Debug, Clone, PartialEq)]
pub enum BrushOp {
    /// Cover the whole surface
    Fill { color: &'static str },
    Dot {
        at: Vec2,
        radius: f32,
        color: &'static str,
    },
    /// Round-capped line
    Segment {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: &'static str,
    },
}

#[derive(Debug, Clone)]
pub struct FreeDrawGame {
    color: usize,
    last_point: Option<Vec2>,
    pending: Vec<BrushOp>,
    draw_sound: SoundThrottle,
}

impl Default for FreeDrawGame {
    fn default() -> Self {
        Self::new()
    }
}

impl FreeDrawGame {
    /// Fresh session with a blank white surface
    pub fn new() -> Self {
        Self {
            color: 0,
            last_point: None,
            pending: vec![BrushOp::Fill { color: PAPER }],
            draw_sound: SoundThrottle::new(FREE_DRAW_SOUND_INTERVAL_MS),
        }
    }

    pub fn color(&self) -> &'static str {
        PALETTE[self.color]
    }

    pub fn color_index(&self) -> usize {
        self.color
    }

    pub fn is_eraser(&self) -> bool {
        self.color() == PAPER
    }

    pub fn brush_size(&self) -> f32 {
        if self.is_eraser() { ERASER_SIZE } else { BRUSH_SIZE }
    }

    /// Pick a palette entry; out-of-range indices are ignored
    pub fn select_color(&mut self, index: usize) -> Vec<GameEvent> {
        if index >= PALETTE.len() {
            return Vec::new();
        }
        self.color = index;
        vec![GameEvent::Sound(SoundEffect::Click)]
    }

    pub fn clear(&mut self) -> Vec<GameEvent> {
        self.pending.push(BrushOp::Fill { color: PAPER });
        vec![GameEvent::Sound(SoundEffect::Pop)]
    }

    pub fn save(&mut self) -> Vec<GameEvent> {
        vec![GameEvent::Sound(SoundEffect::Click), GameEvent::SaveDrawing]
    }

    /// Drain queued paint operations, oldest first
    pub fn take_ops(&mut self) -> Vec<BrushOp> {
        std::mem::take(&mut self.pending)
    }

    pub fn pointer(&mut self, input: PointerInput, now: f64) -> Vec<GameEvent> {
        match input.phase {
            PointerPhase::Down => {
                self.last_point = Some(input.pos);
                self.pending.push(BrushOp::Dot {
                    at: input.pos,
                    radius: self.brush_size() / 2.0,
                    color: self.color(),
                });
                Vec::new()
            }
            PointerPhase::Move => {
                let Some(from) = self.last_point else {
                    return Vec::new();
                };
                self.pending.push(BrushOp::Segment {
                    from,
                    to: input.pos,
                    width: self.brush_size(),
                    color: self.color(),
                });
                self.last_point = Some(input.pos);
                if self.draw_sound.ready(now) {
                    vec![GameEvent::Sound(SoundEffect::Draw)]
                } else {
                    Vec::new()
                }
            }
            PointerPhase::Up => {
                self.last_point = None;
                Vec::new()
            }
        }
    }
}
