//! Trace the shape
//!
//! Kids drag a finger over a dotted outline. Only the next unconfirmed dot is
//! ever tested, so dots are confirmed strictly in order and cannot be
//! skipped. Finishing a shape pays out, then the next shape appears after a
//! short pause.

use glam::Vec2;
use rand::Rng;

use super::shapes::{Shape, shapes_for};
use super::{GameEvent, SoundThrottle, Timers, shuffle};
use crate::audio::SoundEffect;
use crate::consts::{DRAW_SOUND_INTERVAL_MS, TRACE_ADVANCE_DELAY_MS};
use crate::difficulty::{Difficulty, DifficultySettings};
use crate::platform::{PointerInput, PointerPhase};
use crate::profile::TrackedGame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TraceAction {
    NextShape,
}

/// One trace session
#[derive(Debug, Clone)]
pub struct TraceGame {
    pool: Vec<&'static Shape>,
    index: usize,
    confirmed: usize,
    stroke: Vec<Vec2>,
    drawing: bool,
    canvas: Vec2,
    earned_stars: u32,
    draw_sound: SoundThrottle,
    timers: Timers<TraceAction>,
}

impl TraceGame {
    /// Start a session; the shape pool is shuffled once here
    pub fn new(difficulty: Difficulty, canvas: Vec2, rng: &mut impl Rng) -> Self {
        let mut pool = shapes_for(difficulty);
        shuffle(&mut pool, rng);
        log::debug!(
            "Trace pool: {:?}",
            pool.iter().map(|s| s.name).collect::<Vec<_>>()
        );
        Self {
            pool,
            index: 0,
            confirmed: 0,
            stroke: Vec::new(),
            drawing: false,
            canvas,
            earned_stars: 0,
            draw_sound: SoundThrottle::new(DRAW_SOUND_INTERVAL_MS),
            timers: Timers::new(),
        }
    }

    pub fn pool(&self) -> &[&'static Shape] {
        &self.pool
    }

    pub fn current_shape(&self) -> &'static Shape {
        self.pool[self.index % self.pool.len()]
    }

    /// Number of dots reached so far on the current shape
    pub fn points_confirmed(&self) -> usize {
        self.confirmed
    }

    pub fn is_shape_complete(&self) -> bool {
        self.confirmed >= self.current_shape().points.len()
    }

    /// Shapes live in the largest square centred on the canvas
    fn to_canvas(&self, p: Vec2) -> Vec2 {
        let side = self.canvas.min_element();
        (self.canvas - Vec2::splat(side)) * 0.5 + p * side
    }

    /// Dots of the current shape in canvas pixels
    pub fn target_points(&self) -> Vec<Vec2> {
        self.current_shape()
            .points
            .iter()
            .map(|p| self.to_canvas(*p))
            .collect()
    }

    /// The next dot to reach, if any
    pub fn next_target(&self) -> Option<Vec2> {
        self.current_shape()
            .points
            .get(self.confirmed)
            .map(|p| self.to_canvas(*p))
    }

    /// Current stroke (display only)
    pub fn stroke(&self) -> &[Vec2] {
        &self.stroke
    }

    pub fn earned_stars(&self) -> u32 {
        self.earned_stars
    }

    pub fn pointer(
        &mut self,
        input: PointerInput,
        settings: &DifficultySettings,
        now: f64,
    ) -> Vec<GameEvent> {
        match input.phase {
            PointerPhase::Down => {
                self.drawing = true;
                self.stroke.clear();
                self.stroke.push(input.pos);
                Vec::new()
            }
            PointerPhase::Move if self.drawing => self.trace_to(input.pos, settings, now),
            PointerPhase::Move => Vec::new(),
            PointerPhase::Up => {
                self.drawing = false;
                Vec::new()
            }
        }
    }

    fn trace_to(&mut self, pos: Vec2, settings: &DifficultySettings, now: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        self.stroke.push(pos);

        if self.draw_sound.ready(now) {
            events.push(GameEvent::Sound(SoundEffect::Draw));
        }

        let Some(target) = self.next_target() else {
            // Shape already done, waiting for the next one
            return events;
        };
        if pos.distance(target) >= settings.trace_snap_distance {
            return events;
        }

        self.confirmed += 1;
        events.push(GameEvent::Sound(SoundEffect::Pop));

        if self.is_shape_complete() {
            let shape = self.current_shape();
            log::info!("Traced {} {}", shape.name, shape.glyph);
            self.earned_stars += 1;
            events.extend([
                GameEvent::Sound(SoundEffect::Success),
                GameEvent::Celebrate,
                GameEvent::StarEarned,
                GameEvent::Completed(TrackedGame::Trace),
                GameEvent::Collected(shape.glyph.to_string()),
            ]);
            self.timers
                .after(now, TRACE_ADVANCE_DELAY_MS, TraceAction::NextShape);
        }
        events
    }

    /// Fire due transitions
    pub fn update(&mut self, now: f64) -> Vec<GameEvent> {
        for action in self.timers.take_due(now) {
            match action {
                TraceAction::NextShape => {
                    self.index = (self.index + 1) % self.pool.len();
                    self.confirmed = 0;
                    self.stroke.clear();
                }
            }
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::settings_for;
    use crate::games::shapes::SHAPES;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const CANVAS: Vec2 = Vec2::new(400.0, 400.0);

    fn game(difficulty: Difficulty) -> (TraceGame, DifficultySettings) {
        let mut rng = Pcg32::seed_from_u64(7);
        (TraceGame::new(difficulty, CANVAS, &mut rng), settings_for(difficulty))
    }

    fn trace_whole_shape(g: &mut TraceGame, s: &DifficultySettings, now: f64) -> Vec<GameEvent> {
        let targets = g.target_points();
        g.pointer(PointerInput::down(targets[0].x, targets[0].y), s, now);
        let mut events = Vec::new();
        for (i, t) in targets.iter().enumerate() {
            events.extend(g.pointer(PointerInput::moved(t.x, t.y), s, now + i as f64));
        }
        events
    }

    #[test]
    fn test_pool_matches_difficulty() {
        let (g, _) = game(Difficulty::Medium);
        assert_eq!(g.pool().len(), 6);
        assert!(g.pool().iter().all(|s| s.tier != Difficulty::Hard));
    }

    #[test]
    fn test_wide_canvas_keeps_shapes_square() {
        let square = SHAPES.iter().find(|s| s.name == "Square").unwrap();
        let mut g = game(Difficulty::Easy).0;
        g.canvas = Vec2::new(800.0, 500.0);
        while g.current_shape().name != square.name {
            g.index += 1;
        }

        let pts = g.target_points();
        assert_eq!(pts[0], Vec2::new(275.0, 125.0));
        assert_eq!(pts[2], Vec2::new(525.0, 375.0));
        let (w, h) = (pts[1].x - pts[0].x, pts[3].y - pts[0].y);
        assert_eq!(w, h);
        assert_eq!(g.next_target(), Some(pts[0]));
    }

    #[test]
    fn test_move_without_press_does_nothing() {
        let (mut g, s) = game(Difficulty::Easy);
        let first = g.target_points()[0];
        let events = g.pointer(PointerInput::moved(first.x, first.y), &s, 0.0);
        assert!(events.is_empty());
        assert_eq!(g.points_confirmed(), 0);
    }

    #[test]
    fn test_points_confirm_in_order_only() {
        let (mut g, s) = game(Difficulty::Easy);
        let targets = g.target_points();
        g.pointer(PointerInput::down(0.0, 0.0), &s, 0.0);

        // Sitting right on the second dot while the first is open does nothing
        g.pointer(PointerInput::moved(targets[1].x, targets[1].y), &s, 1.0);
        assert_eq!(g.points_confirmed(), 0);

        g.pointer(PointerInput::moved(targets[0].x, targets[0].y), &s, 2.0);
        assert_eq!(g.points_confirmed(), 1);
        g.pointer(PointerInput::moved(targets[1].x, targets[1].y), &s, 3.0);
        assert_eq!(g.points_confirmed(), 2);
    }

    #[test]
    fn test_snap_distance_is_exclusive() {
        let (mut g, s) = game(Difficulty::Easy);
        let first = g.target_points()[0];
        g.pointer(PointerInput::down(0.0, 0.0), &s, 0.0);

        let miss = first + Vec2::new(s.trace_snap_distance, 0.0);
        g.pointer(PointerInput::moved(miss.x, miss.y), &s, 1.0);
        assert_eq!(g.points_confirmed(), 0);

        let hit = first + Vec2::new(s.trace_snap_distance - 1.0, 0.0);
        let events = g.pointer(PointerInput::moved(hit.x, hit.y), &s, 2.0);
        assert_eq!(g.points_confirmed(), 1);
        assert!(events.contains(&GameEvent::Sound(SoundEffect::Pop)));
    }

    #[test]
    fn test_finishing_a_shape_pays_out_once_then_advances() {
        let (mut g, s) = game(Difficulty::Easy);
        let shape = g.current_shape();
        let events = trace_whole_shape(&mut g, &s, 0.0);

        assert!(g.is_shape_complete());
        assert_eq!(events.iter().filter(|e| **e == GameEvent::StarEarned).count(), 1);
        assert!(events.contains(&GameEvent::Completed(TrackedGame::Trace)));
        assert!(events.contains(&GameEvent::Collected(shape.glyph.to_string())));
        assert_eq!(g.earned_stars(), 1);

        // Extra moves while waiting change nothing
        let last = *g.target_points().last().unwrap();
        let more = g.pointer(PointerInput::moved(last.x, last.y), &s, 500.0);
        assert!(!more.contains(&GameEvent::StarEarned));

        g.update(1000.0);
        assert_eq!(g.current_shape().name, shape.name);

        g.update(100.0 + TRACE_ADVANCE_DELAY_MS);
        assert_eq!(g.points_confirmed(), 0);
        assert!(g.stroke().is_empty());
        assert_ne!(g.current_shape().name, shape.name);
    }

    #[test]
    fn test_pool_wraps_around() {
        let (mut g, s) = game(Difficulty::Easy);
        let first = g.current_shape().name;
        let mut now = 0.0;
        for _ in 0..g.pool().len() {
            trace_whole_shape(&mut g, &s, now);
            now += TRACE_ADVANCE_DELAY_MS + 100.0;
            g.update(now);
        }
        assert_eq!(g.current_shape().name, first);
        assert_eq!(g.earned_stars(), 3);
    }

    #[test]
    fn test_draw_sound_is_throttled() {
        let (mut g, s) = game(Difficulty::Easy);
        g.pointer(PointerInput::down(0.0, 0.0), &s, 0.0);
        let draws = (0..10)
            .flat_map(|i| g.pointer(PointerInput::moved(1.0, 1.0), &s, i as f64 * 20.0))
            .filter(|e| *e == GameEvent::Sound(SoundEffect::Draw))
            .count();
        // t = 0, 120 (> 100 after 0), ...
        assert_eq!(draws, 2);
    }
}
