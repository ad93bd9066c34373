//! Menu routing and progress bookkeeping
//!
//! The shell owns the profile and whichever game session is on screen.
//! Sessions report `GameEvent`s; the shell turns progress events into
//! profile writes, starts celebration bursts, and hands sounds and exports
//! back to the caller as `Feedback`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::audio::SoundEffect;
use crate::celebration::Celebration;
use crate::difficulty::{Difficulty, DifficultySettings};
use crate::games::{BrushOp, FreeDrawGame, GameEvent, Habitat, MatchGame, PathGame, TraceGame};
use crate::platform::{PointerInput, PointerPhase};
use crate::profile::ProfileStore;
use crate::share;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Menu,
    Trace,
    Match,
    Path,
    FreeDraw,
    Habitat,
}

impl ViewKind {
    /// Menu buttons, in display order
    pub const GAMES: [ViewKind; 4] = [
        ViewKind::Trace,
        ViewKind::Match,
        ViewKind::Path,
        ViewKind::FreeDraw,
    ];

    /// DOM id suffix and log name
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewKind::Menu => "menu",
            ViewKind::Trace => "trace",
            ViewKind::Match => "match",
            ViewKind::Path => "path",
            ViewKind::FreeDraw => "freedraw",
            ViewKind::Habitat => "habitat",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "menu" => Some(ViewKind::Menu),
            "trace" => Some(ViewKind::Trace),
            "match" => Some(ViewKind::Match),
            "path" => Some(ViewKind::Path),
            "freedraw" => Some(ViewKind::FreeDraw),
            "habitat" => Some(ViewKind::Habitat),
            _ => None,
        }
    }
}

/// The live screen and its session
#[derive(Debug, Clone)]
pub enum View {
    Menu,
    Trace(TraceGame),
    Match(MatchGame),
    Path(PathGame),
    FreeDraw(FreeDrawGame),
    Habitat(Habitat),
}

impl View {
    pub fn kind(&self) -> ViewKind {
        match self {
            View::Menu => ViewKind::Menu,
            View::Trace(_) => ViewKind::Trace,
            View::Match(_) => ViewKind::Match,
            View::Path(_) => ViewKind::Path,
            View::FreeDraw(_) => ViewKind::FreeDraw,
            View::Habitat(_) => ViewKind::Habitat,
        }
    }
}

/// What the platform layer has to do after a shell call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Play(SoundEffect),
    /// Export the free-draw surface
    SaveDrawing,
}

pub struct Shell {
    store: ProfileStore,
    view: View,
    celebration: Celebration,
    canvas: Vec2,
    rng: Pcg32,
}

impl Shell {
    pub fn new(store: ProfileStore, canvas: Vec2, seed: u64) -> Self {
        Self {
            store,
            view: View::Menu,
            celebration: Celebration::new(),
            canvas,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_kind(&self) -> ViewKind {
        self.view.kind()
    }

    pub fn celebration(&self) -> &Celebration {
        &self.celebration
    }

    pub fn difficulty(&self) -> Difficulty {
        self.store.difficulty()
    }

    pub fn settings(&self) -> DifficultySettings {
        self.store.settings()
    }

    pub fn sound_enabled(&self) -> bool {
        self.store.sound_enabled()
    }

    /// Stars earned in the current session (header counter)
    pub fn session_stars(&self) -> u32 {
        match &self.view {
            View::Trace(g) => g.earned_stars(),
            View::Match(g) => g.earned_stars(),
            View::Path(g) => g.earned_stars(),
            View::Menu | View::FreeDraw(_) | View::Habitat(_) => 0,
        }
    }

    /// Header line for the current view
    pub fn title(&self) -> String {
        match &self.view {
            View::Menu => "🦁 Animal Fun! 🐘".to_string(),
            View::Trace(g) => format!("Trace the {}", g.current_shape().glyph),
            View::Match(_) => "Find the Pairs!".to_string(),
            View::Path(g) => {
                let level = g.level();
                format!("Help {} find the {}!", level.animal, level.goal_label)
            }
            View::FreeDraw(_) => "🎨 Free Draw!".to_string(),
            View::Habitat(_) => {
                format!("🏡 My Habitat ({})", self.store.collected_animals().len())
            }
        }
    }

    /// Open a screen with a fresh session; the previous session, its
    /// pending transitions and any running bursts are dropped
    pub fn select(&mut self, kind: ViewKind) -> Vec<Feedback> {
        self.celebration = Celebration::new();
        let difficulty = self.store.difficulty();
        let settings = self.store.settings();
        let canvas = self.canvas;
        self.view = match kind {
            ViewKind::Menu => View::Menu,
            ViewKind::Trace => View::Trace(TraceGame::new(difficulty, canvas, &mut self.rng)),
            ViewKind::Match => View::Match(MatchGame::new(&settings, canvas, self.rng.random())),
            ViewKind::Path => View::Path(PathGame::new(difficulty, canvas, self.rng.random())),
            ViewKind::FreeDraw => View::FreeDraw(FreeDrawGame::new()),
            ViewKind::Habitat => View::Habitat(Habitat::new(
                self.store.collected_animals(),
                canvas,
                &mut self.rng,
            )),
        };
        log::info!("Showing {} ({})", kind.as_str(), difficulty.as_str());
        vec![Feedback::Play(SoundEffect::Click)]
    }

    /// Back to the menu
    pub fn back(&mut self) -> Vec<Feedback> {
        if self.view.kind() == ViewKind::Menu {
            return Vec::new();
        }
        self.select(ViewKind::Menu)
    }

    /// Escape key: leaves free draw
    pub fn escape(&mut self) -> Vec<Feedback> {
        if matches!(self.view, View::FreeDraw(_)) {
            self.back()
        } else {
            Vec::new()
        }
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Vec<Feedback> {
        self.store.set_difficulty(difficulty);
        log::info!("Difficulty set to {}", difficulty.as_str());
        vec![Feedback::Play(SoundEffect::Click)]
    }

    /// Flip the sound setting; the click only plays when turning sound on
    pub fn toggle_sound(&mut self) -> Vec<Feedback> {
        let enabled = !self.store.sound_enabled();
        self.store.set_sound_enabled(enabled);
        if enabled {
            vec![Feedback::Play(SoundEffect::Click)]
        } else {
            Vec::new()
        }
    }

    /// A glyph in the menu collection row was tapped
    pub fn tap_collected(&mut self, glyph: &str) -> Vec<Feedback> {
        if !self.store.collected_animals().iter().any(|g| g == glyph) {
            return Vec::new();
        }
        vec![Feedback::Play(SoundEffect::animal(glyph))]
    }

    pub fn select_color(&mut self, index: usize, now: f64) -> Vec<Feedback> {
        let events = match &mut self.view {
            View::FreeDraw(g) => g.select_color(index),
            _ => Vec::new(),
        };
        self.apply(events, now)
    }

    pub fn clear_drawing(&mut self, now: f64) -> Vec<Feedback> {
        let events = match &mut self.view {
            View::FreeDraw(g) => g.clear(),
            _ => Vec::new(),
        };
        self.apply(events, now)
    }

    pub fn save_drawing(&mut self, now: f64) -> Vec<Feedback> {
        let events = match &mut self.view {
            View::FreeDraw(g) => g.save(),
            _ => Vec::new(),
        };
        self.apply(events, now)
    }

    /// `my-<fun name>-HHMM` for the export
    pub fn drawing_filename(&mut self, hour: u32, minute: u32) -> String {
        share::drawing_filename(hour, minute, &mut self.rng)
    }

    /// Paint operations queued by free draw since the last frame
    pub fn take_brush_ops(&mut self) -> Vec<BrushOp> {
        match &mut self.view {
            View::FreeDraw(g) => g.take_ops(),
            _ => Vec::new(),
        }
    }

    /// Route a pointer sample to the live session
    pub fn pointer(&mut self, input: PointerInput, now: f64) -> Vec<Feedback> {
        let settings = self.store.settings();
        let events = match &mut self.view {
            View::Menu => Vec::new(),
            View::Trace(g) => g.pointer(input, &settings, now),
            View::Path(g) => g.pointer(input, &settings, now),
            View::FreeDraw(g) => g.pointer(input, now),
            View::Match(g) if input.phase == PointerPhase::Down => g.tap(input.pos, &settings, now),
            View::Habitat(g) if input.phase == PointerPhase::Down => g.tap(input.pos),
            View::Match(_) | View::Habitat(_) => Vec::new(),
        };
        self.apply(events, now)
    }

    /// Per-frame tick: fire due transitions, step the habitat, expire bursts
    pub fn update(&mut self, now: f64) -> Vec<Feedback> {
        let settings = self.store.settings();
        let events = match &mut self.view {
            View::Trace(g) => g.update(now),
            View::Match(g) => g.update(&settings, now),
            View::Path(g) => g.update(now),
            View::Habitat(g) => {
                g.step();
                Vec::new()
            }
            View::Menu | View::FreeDraw(_) => Vec::new(),
        };
        let feedback = self.apply(events, now);
        self.celebration.prune(now);
        feedback
    }

    fn apply(&mut self, events: Vec<GameEvent>, now: f64) -> Vec<Feedback> {
        let mut feedback = Vec::new();
        for event in events {
            match event {
                GameEvent::Sound(effect) => feedback.push(Feedback::Play(effect)),
                GameEvent::Celebrate => self.celebration.trigger_celebration(now, &mut self.rng),
                GameEvent::PointEffect(at) => {
                    self.celebration.trigger_point_effect(at, now, &mut self.rng)
                }
                GameEvent::StarEarned => self.store.add_stars(1),
                GameEvent::Completed(game) => self.store.complete_game(game),
                GameEvent::Collected(glyph) => {
                    if self.store.collect_animal(&glyph) {
                        log::info!("Collected {}", glyph);
                    }
                }
                GameEvent::SaveDrawing => feedback.push(Feedback::SaveDrawing),
            }
        }
        feedback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;
    use crate::profile::TrackedGame;

    const CANVAS: Vec2 = Vec2::new(800.0, 500.0);

    fn shell() -> (Shell, MemoryStorage) {
        let storage = MemoryStorage::new();
        let store = ProfileStore::load(Box::new(storage.clone()));
        (Shell::new(store, CANVAS, 1), storage)
    }

    #[test]
    fn test_starts_on_menu() {
        let (s, _) = shell();
        assert_eq!(s.view_kind(), ViewKind::Menu);
        assert_eq!(s.session_stars(), 0);
    }

    #[test]
    fn test_view_kind_names_round_trip() {
        for kind in ViewKind::GAMES.into_iter().chain([ViewKind::Menu, ViewKind::Habitat]) {
            assert_eq!(ViewKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(ViewKind::from_str("pong"), None);
    }

    #[test]
    fn test_select_and_back() {
        let (mut s, _) = shell();
        assert_eq!(s.select(ViewKind::Match), vec![Feedback::Play(SoundEffect::Click)]);
        assert_eq!(s.view_kind(), ViewKind::Match);
        s.back();
        assert_eq!(s.view_kind(), ViewKind::Menu);
        assert!(s.back().is_empty());
    }

    #[test]
    fn test_escape_only_leaves_free_draw() {
        let (mut s, _) = shell();
        s.select(ViewKind::Trace);
        assert!(s.escape().is_empty());
        assert_eq!(s.view_kind(), ViewKind::Trace);
        s.select(ViewKind::FreeDraw);
        s.escape();
        assert_eq!(s.view_kind(), ViewKind::Menu);
    }

    #[test]
    fn test_trace_completion_updates_profile() {
        let (mut s, storage) = shell();
        s.select(ViewKind::Trace);
        let targets = match s.view() {
            View::Trace(g) => g.target_points(),
            _ => unreachable!(),
        };
        let glyph = match s.view() {
            View::Trace(g) => g.current_shape().glyph,
            _ => unreachable!(),
        };
        s.pointer(PointerInput::down(0.0, 0.0), 0.0);
        for (i, t) in targets.iter().enumerate() {
            s.pointer(PointerInput::moved(t.x, t.y), i as f64);
        }

        assert_eq!(s.store().total_stars(), 1);
        assert_eq!(s.store().games_completed(TrackedGame::Trace), 1);
        assert_eq!(s.store().collected_animals(), [glyph.to_string()]);
        assert_eq!(s.session_stars(), 1);
        assert!(s.celebration().is_active());

        let saved = storage.peek(ProfileStore::STORAGE_KEY).unwrap();
        assert!(saved.contains("\"totalStars\":1"));
    }

    #[test]
    fn test_bursts_do_not_follow_into_the_next_view() {
        let (mut s, _) = shell();
        s.select(ViewKind::Trace);
        let targets = match s.view() {
            View::Trace(g) => g.target_points(),
            _ => unreachable!(),
        };
        s.pointer(PointerInput::down(0.0, 0.0), 0.0);
        for (i, t) in targets.iter().enumerate() {
            s.pointer(PointerInput::moved(t.x, t.y), i as f64);
        }
        assert!(s.celebration().is_active());

        s.back();
        assert!(!s.celebration().is_active());
        s.select(ViewKind::FreeDraw);
        s.update(500.0);
        assert!(!s.celebration().is_active());
        assert!(s.celebration().live_pieces(500.0).is_empty());
    }

    #[test]
    fn test_trace_title_shows_the_shape_glyph() {
        let (mut s, _) = shell();
        s.select(ViewKind::Trace);
        let glyph = match s.view() {
            View::Trace(g) => g.current_shape().glyph,
            _ => unreachable!(),
        };
        assert_eq!(s.title(), format!("Trace the {glyph}"));
    }

    #[test]
    fn test_leaving_cancels_pending_transitions() {
        let (mut s, _) = shell();
        s.select(ViewKind::Path);
        let points: Vec<Vec2> = match s.view() {
            View::Path(g) => (0..=100).map(|k| g.position_on_path(k as f32 / 100.0)).collect(),
            _ => unreachable!(),
        };
        s.pointer(PointerInput::down(points[0].x, points[0].y), 0.0);
        for p in &points {
            s.pointer(PointerInput::moved(p.x, p.y), 1.0);
        }
        assert_eq!(s.store().total_stars(), 1);

        s.back();
        s.select(ViewKind::Path);
        // The old 2.5s advance must not touch the new session
        s.update(10_000.0);
        match s.view() {
            View::Path(g) => {
                assert_eq!(g.level_index(), 0);
                assert_eq!(g.progress(), 0.0);
            }
            _ => unreachable!(),
        }
        assert_eq!(s.store().total_stars(), 1);
    }

    #[test]
    fn test_sound_toggle_and_collected_taps() {
        let (mut s, storage) = shell();
        assert!(s.toggle_sound().is_empty());
        assert!(!s.sound_enabled());
        assert!(storage.peek(ProfileStore::STORAGE_KEY).unwrap().contains("\"soundEnabled\":false"));
        assert_eq!(s.toggle_sound(), vec![Feedback::Play(SoundEffect::Click)]);

        assert!(s.tap_collected("🐱").is_empty());
        s.store.collect_animal("🐱");
        assert_eq!(s.tap_collected("🐱"), vec![Feedback::Play(SoundEffect::animal("🐱"))]);
    }

    #[test]
    fn test_difficulty_applies_to_next_session() {
        let (mut s, _) = shell();
        s.set_difficulty(Difficulty::Hard);
        s.select(ViewKind::Match);
        match s.view() {
            View::Match(g) => assert_eq!(g.cards().len(), 12),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_free_draw_buttons() {
        let (mut s, _) = shell();
        assert!(s.save_drawing(0.0).is_empty());
        s.select(ViewKind::FreeDraw);
        assert!(s.save_drawing(0.0).contains(&Feedback::SaveDrawing));
        s.clear_drawing(0.0);
        assert_eq!(s.take_brush_ops().len(), 2);
        assert!(s.take_brush_ops().is_empty());
        let name = s.drawing_filename(14, 7);
        assert!(name.starts_with("my-") && name.ends_with("-1407"));
    }

    #[test]
    fn test_habitat_shows_collection() {
        let (mut s, _) = shell();
        s.store.collect_animal("🐸");
        s.store.collect_animal("🔵");
        s.select(ViewKind::Habitat);
        assert_eq!(s.title(), "🏡 My Habitat (2)");
        match s.view() {
            View::Habitat(h) => assert_eq!(h.entities().len(), 2),
            _ => unreachable!(),
        }
        s.update(16.0);
    }
}
