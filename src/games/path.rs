//! Follow the path
//!
//! A wavy dotted path runs from left to right. Drawing along it walks the
//! animal toward its goal; strokes far from the path do nothing.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::{GameEvent, SoundThrottle, Timers};
use crate::audio::SoundEffect;
use crate::consts::{
    DRAW_SOUND_INTERVAL_MS, PATH_ADVANCE_DELAY_MS, PATH_BACKTRACK_WINDOW, PATH_COMPLETE_PROGRESS,
    PATH_SAMPLE_STEP,
};
use crate::difficulty::{Difficulty, DifficultySettings};
use crate::platform::{PointerInput, PointerPhase};
use crate::profile::TrackedGame;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathLevel {
    pub animal: &'static str,
    pub goal: &'static str,
    pub goal_label: &'static str,
}

#[rustfmt::skip]
pub const LEVELS: [PathLevel; 8] = [
    PathLevel { animal: "🐱", goal: "🏠", goal_label: "home" },
    PathLevel { animal: "🐶", goal: "🦴", goal_label: "bone" },
    PathLevel { animal: "🐰", goal: "🥕", goal_label: "carrot" },
    PathLevel { animal: "🐝", goal: "🌸", goal_label: "flower" },
    PathLevel { animal: "🐟", goal: "🌊", goal_label: "ocean" },
    PathLevel { animal: "🐸", goal: "🪷", goal_label: "lily pad" },
    PathLevel { animal: "🦊", goal: "🌲", goal_label: "forest" },
    PathLevel { animal: "🐧", goal: "❄️", goal_label: "ice" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathAction {
    NextLevel,
}

/// Segments in the polyline for a difficulty
pub fn segments_for(difficulty: Difficulty) -> usize {
    match difficulty {
        Difficulty::Easy => 3,
        Difficulty::Medium => 5,
        Difficulty::Hard | Difficulty::Grownup => 7,
    }
}

/// Normalized waypoints, `segments + 1` of them, left to right
pub fn generate_path(difficulty: Difficulty, phase: f32) -> Vec<Vec2> {
    let segments = segments_for(difficulty);
    let amplitude = if difficulty == Difficulty::Easy { 0.1 } else { 0.2 };
    (0..=segments)
        .map(|i| {
            let x = 0.1 + 0.8 * i as f32 / segments as f32;
            let y = 0.5 + (1.2 * i as f32 + phase).sin() * amplitude;
            Vec2::new(x, y)
        })
        .collect()
}

/// One path session
#[derive(Debug, Clone)]
pub struct PathGame {
    difficulty: Difficulty,
    level: usize,
    waypoints: Vec<Vec2>,
    progress: f32,
    completed: bool,
    drawing: bool,
    stroke: Vec<Vec2>,
    canvas: Vec2,
    earned_stars: u32,
    rng: Pcg32,
    draw_sound: SoundThrottle,
    timers: Timers<PathAction>,
}

impl PathGame {
    pub fn new(difficulty: Difficulty, canvas: Vec2, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let waypoints = generate_path(difficulty, Self::random_phase(&mut rng));
        Self {
            difficulty,
            level: 0,
            waypoints,
            progress: 0.0,
            completed: false,
            drawing: false,
            stroke: Vec::new(),
            canvas,
            earned_stars: 0,
            rng,
            draw_sound: SoundThrottle::new(DRAW_SOUND_INTERVAL_MS),
            timers: Timers::new(),
        }
    }

    fn random_phase(rng: &mut Pcg32) -> f32 {
        rng.random_range(0.0..std::f32::consts::TAU)
    }

    pub fn level(&self) -> &'static PathLevel {
        &LEVELS[self.level % LEVELS.len()]
    }

    pub fn level_index(&self) -> usize {
        self.level
    }

    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Waypoints in canvas pixels
    pub fn waypoints_px(&self) -> Vec<Vec2> {
        self.waypoints.iter().map(|p| *p * self.canvas).collect()
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn stroke(&self) -> &[Vec2] {
        &self.stroke
    }

    pub fn earned_stars(&self) -> u32 {
        self.earned_stars
    }

    /// Pixel position at `progress` in [0, 1], linear within each segment
    pub fn position_on_path(&self, progress: f32) -> Vec2 {
        let segments = self.waypoints.len().saturating_sub(1);
        if segments == 0 {
            return self.waypoints.first().copied().unwrap_or_default() * self.canvas;
        }
        let scaled = progress.clamp(0.0, 1.0) * segments as f32;
        let index = (scaled.floor() as usize).min(segments - 1);
        let local = scaled - index as f32;
        self.waypoints[index].lerp(self.waypoints[index + 1], local) * self.canvas
    }

    pub fn pointer(
        &mut self,
        input: PointerInput,
        settings: &DifficultySettings,
        now: f64,
    ) -> Vec<GameEvent> {
        if self.completed {
            return Vec::new();
        }
        match input.phase {
            PointerPhase::Down => {
                self.drawing = true;
                self.stroke.clear();
                self.stroke.push(input.pos);
                Vec::new()
            }
            PointerPhase::Move if self.drawing => {
                self.stroke.push(input.pos);
                let mut events = Vec::new();
                if self.draw_sound.ready(now) {
                    events.push(GameEvent::Sound(SoundEffect::Draw));
                }
                events.extend(self.advance_toward(input.pos, settings, now));
                events
            }
            PointerPhase::Move => Vec::new(),
            PointerPhase::Up => {
                self.drawing = false;
                Vec::new()
            }
        }
    }

    /// Nearest sample at or after the backtrack window, as (progress, distance)
    fn nearest_sample(&self, pos: Vec2) -> Option<(f32, f32)> {
        let samples = (1.0 / PATH_SAMPLE_STEP).round() as usize;
        let floor = self.progress - PATH_BACKTRACK_WINDOW;
        (0..=samples)
            .map(|k| k as f32 * PATH_SAMPLE_STEP)
            .filter(|p| *p >= floor)
            .map(|p| (p, pos.distance(self.position_on_path(p))))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    fn advance_toward(&mut self, pos: Vec2, settings: &DifficultySettings, now: f64) -> Vec<GameEvent> {
        let Some((nearest, distance)) = self.nearest_sample(pos) else {
            return Vec::new();
        };
        if distance >= settings.path_snap_distance || nearest <= self.progress {
            return Vec::new();
        }

        self.progress += (nearest - self.progress) * settings.animal_speed.min(1.0);
        self.progress = self.progress.min(1.0);

        if self.progress < PATH_COMPLETE_PROGRESS {
            return Vec::new();
        }

        self.completed = true;
        self.drawing = false;
        self.earned_stars += 1;
        let level = self.level();
        log::info!("{} reached the {}", level.animal, level.goal_label);
        self.timers
            .after(now, PATH_ADVANCE_DELAY_MS, PathAction::NextLevel);
        vec![
            GameEvent::Sound(SoundEffect::Success),
            GameEvent::Celebrate,
            GameEvent::StarEarned,
            GameEvent::Completed(TrackedGame::Path),
            GameEvent::Collected(level.animal.to_string()),
        ]
    }

    pub fn update(&mut self, now: f64) -> Vec<GameEvent> {
        for action in self.timers.take_due(now) {
            match action {
                PathAction::NextLevel => {
                    self.level += 1;
                    let phase = Self::random_phase(&mut self.rng);
                    self.waypoints = generate_path(self.difficulty, phase);
                    self.progress = 0.0;
                    self.completed = false;
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
    use proptest::prelude::*;

    const CANVAS: Vec2 = Vec2::new(800.0, 500.0);

    fn game(d: Difficulty) -> (PathGame, DifficultySettings) {
        (PathGame::new(d, CANVAS, 11), settings_for(d))
    }

    /// Drag along the path from start to finish
    fn walk(g: &mut PathGame, s: &DifficultySettings, now: f64) -> Vec<GameEvent> {
        let start = g.position_on_path(0.0);
        let mut events = g.pointer(PointerInput::down(start.x, start.y), s, now);
        for k in 0..=100 {
            let p = g.position_on_path(k as f32 / 100.0);
            events.extend(g.pointer(PointerInput::moved(p.x, p.y), s, now + k as f64));
        }
        events
    }

    #[test]
    fn test_waypoint_counts() {
        assert_eq!(generate_path(Difficulty::Easy, 0.0).len(), 4);
        assert_eq!(generate_path(Difficulty::Medium, 0.0).len(), 6);
        assert_eq!(generate_path(Difficulty::Hard, 0.0).len(), 8);
        assert_eq!(generate_path(Difficulty::Grownup, 0.0).len(), 8);
    }

    #[test]
    fn test_path_spans_left_to_right() {
        let pts = generate_path(Difficulty::Medium, 1.0);
        assert!((pts[0].x - 0.1).abs() < 1e-6);
        assert!((pts[pts.len() - 1].x - 0.9).abs() < 1e-6);
        assert!(pts.iter().all(|p| (0.3..=0.7).contains(&p.y)));
        let easy = generate_path(Difficulty::Easy, 2.0);
        assert!(easy.iter().all(|p| (0.4..=0.6).contains(&p.y)));
    }

    #[test]
    fn test_position_on_path_endpoints() {
        let (g, _) = game(Difficulty::Easy);
        let px = g.waypoints_px();
        assert!(g.position_on_path(0.0).distance(px[0]) < 1e-3);
        assert!(g.position_on_path(1.0).distance(px[px.len() - 1]) < 1e-3);
    }

    #[test]
    fn test_far_stroke_has_no_effect() {
        let (mut g, s) = game(Difficulty::Easy);
        g.pointer(PointerInput::down(0.0, 0.0), &s, 0.0);
        for i in 0..20 {
            g.pointer(PointerInput::moved(i as f32 * 40.0, 0.0), &s, i as f64);
        }
        assert_eq!(g.progress(), 0.0);
        assert!(!g.is_completed());
    }

    #[test]
    fn test_stroke_along_path_completes_once() {
        let (mut g, s) = game(Difficulty::Easy);
        let level = *g.level();
        let events = walk(&mut g, &s, 0.0);

        assert!(g.is_completed());
        assert!(g.progress() >= PATH_COMPLETE_PROGRESS);
        assert_eq!(events.iter().filter(|e| **e == GameEvent::StarEarned).count(), 1);
        assert!(events.contains(&GameEvent::Completed(TrackedGame::Path)));
        assert!(events.contains(&GameEvent::Collected(level.animal.to_string())));

        // Input is ignored until the next level
        assert!(walk(&mut g, &s, 200.0).is_empty());
        assert_eq!(g.earned_stars(), 1);
    }

    #[test]
    fn test_next_level_after_delay() {
        let (mut g, s) = game(Difficulty::Medium);
        walk(&mut g, &s, 0.0);
        g.update(1000.0);
        assert!(g.is_completed());

        g.update(200.0 + PATH_ADVANCE_DELAY_MS);
        assert!(!g.is_completed());
        assert_eq!(g.progress(), 0.0);
        assert_eq!(g.level_index(), 1);
        assert_eq!(g.level().animal, "🐶");
        assert!(g.stroke().is_empty());
    }

    #[test]
    fn test_slow_animal_still_arrives() {
        let (mut g, s) = game(Difficulty::Grownup);
        assert!(s.animal_speed < 1.0);
        let end = g.position_on_path(1.0);
        walk(&mut g, &s, 0.0);
        // Dwell at the goal until the animal catches up
        for i in 0..50 {
            g.pointer(PointerInput::moved(end.x, end.y), &s, 200.0 + i as f64);
        }
        assert!(g.is_completed());
    }

    proptest! {
        #[test]
        fn prop_progress_never_decreases(
            moves in prop::collection::vec((0.0f32..800.0, 0.0f32..500.0), 1..60),
            seed in any::<u64>(),
        ) {
            let s = settings_for(Difficulty::Easy);
            let mut g = PathGame::new(Difficulty::Easy, CANVAS, seed);
            g.pointer(PointerInput::down(0.0, 0.0), &s, 0.0);
            let mut last = g.progress();
            for (i, (x, y)) in moves.into_iter().enumerate() {
                g.pointer(PointerInput::moved(x, y), &s, i as f64);
                prop_assert!(g.progress() >= last);
                prop_assert!(g.progress() <= 1.0);
                last = g.progress();
            }
        }
    }
}
