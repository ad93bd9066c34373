//! Find the pairs
//!
//! All cards are face up; the child taps two cards with the same animal to
//! match them. A mismatch briefly shows both picks and locks input.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::{GameEvent, Timers, shuffle};
use crate::audio::SoundEffect;
use crate::consts::{MATCH_CELEBRATE_DELAY_MS, MATCH_MISMATCH_REVEAL_MS, MATCH_NEW_DECK_DELAY_MS};
use crate::difficulty::DifficultySettings;
use crate::profile::TrackedGame;

pub const ANIMALS: [&str; 24] = [
    "🐱", "🐶", "🐰", "🦁", "🐘", "🐵", //
    "🐟", "🐙", "🦀", "🦋", "🐝", "🐞", //
    "🐸", "🐢", "🦎", "🐼", "🦊", "🐨", //
    "🐷", "🐮", "🐔", "🦆", "🦉", "🐧",
];

const GRID_GAP: f32 = 12.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: usize,
    pub glyph: &'static str,
    pub matched: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchAction {
    HideMismatch,
    Celebrate,
    NewDeck,
}

/// Where the cards sit on the canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub origin: Vec2,
    pub card_size: f32,
    pub gap: f32,
    pub cols: usize,
}

impl GridLayout {
    /// Columns by deck size: 2 for up to 2 pairs, 3 for 3, else 4
    pub fn columns_for(pairs: usize) -> usize {
        match pairs {
            0..=2 => 2,
            3 => 3,
            _ => 4,
        }
    }

    /// Centered grid; cards shrink below `preferred` when the canvas is too small
    pub fn fit(card_count: usize, preferred: f32, canvas: Vec2) -> Self {
        let cols = Self::columns_for(card_count / 2);
        let rows = card_count.div_ceil(cols).max(1);
        let fit_w = (canvas.x - GRID_GAP * (cols as f32 + 1.0)) / cols as f32;
        let fit_h = (canvas.y - GRID_GAP * (rows as f32 + 1.0)) / rows as f32;
        let card_size = preferred.min(fit_w).min(fit_h).max(1.0);

        let total = Vec2::new(
            cols as f32 * card_size + (cols as f32 - 1.0) * GRID_GAP,
            rows as f32 * card_size + (rows as f32 - 1.0) * GRID_GAP,
        );
        Self {
            origin: (canvas - total) * 0.5,
            card_size,
            gap: GRID_GAP,
            cols,
        }
    }

    /// Top-left corner of card `i`
    pub fn card_origin(&self, i: usize) -> Vec2 {
        let col = (i % self.cols) as f32;
        let row = (i / self.cols) as f32;
        self.origin + Vec2::new(col, row) * (self.card_size + self.gap)
    }

    pub fn card_center(&self, i: usize) -> Vec2 {
        self.card_origin(i) + Vec2::splat(self.card_size * 0.5)
    }

    pub fn hit(&self, pos: Vec2, card_count: usize) -> Option<usize> {
        (0..card_count).find(|&i| {
            let o = self.card_origin(i);
            pos.x >= o.x
                && pos.y >= o.y
                && pos.x < o.x + self.card_size
                && pos.y < o.y + self.card_size
        })
    }
}

/// One pairs session
#[derive(Debug, Clone)]
pub struct MatchGame {
    cards: Vec<Card>,
    selected: Option<usize>,
    /// Both picks of a mismatch while they are still on show
    mismatch: Option<(usize, usize)>,
    matched: usize,
    locked: bool,
    level: u32,
    earned_stars: u32,
    canvas: Vec2,
    rng: Pcg32,
    timers: Timers<MatchAction>,
}

/// `pairs` distinct animals, each twice, shuffled
pub fn deal(pairs: usize, rng: &mut Pcg32) -> Vec<Card> {
    let mut animals = ANIMALS;
    shuffle(&mut animals, rng);
    let picked = &animals[..pairs.min(ANIMALS.len())];

    let mut glyphs: Vec<&'static str> = picked.iter().chain(picked).copied().collect();
    shuffle(&mut glyphs, rng);
    glyphs
        .into_iter()
        .enumerate()
        .map(|(id, glyph)| Card {
            id,
            glyph,
            matched: false,
        })
        .collect()
}

impl MatchGame {
    pub fn new(settings: &DifficultySettings, canvas: Vec2, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let cards = deal(settings.match_pairs, &mut rng);
        Self {
            cards,
            selected: None,
            mismatch: None,
            matched: 0,
            locked: false,
            level: 0,
            earned_stars: 0,
            canvas,
            rng,
            timers: Timers::new(),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn mismatch(&self) -> Option<(usize, usize)> {
        self.mismatch
    }

    pub fn matched_count(&self) -> usize {
        self.matched
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn earned_stars(&self) -> u32 {
        self.earned_stars
    }

    pub fn all_matched(&self) -> bool {
        !self.cards.is_empty() && self.matched >= self.cards.len()
    }

    pub fn layout(&self, settings: &DifficultySettings) -> GridLayout {
        GridLayout::fit(self.cards.len(), settings.match_card_size, self.canvas)
    }

    /// Tap at a canvas position
    pub fn tap(&mut self, pos: Vec2, settings: &DifficultySettings, now: f64) -> Vec<GameEvent> {
        let layout = self.layout(settings);
        match layout.hit(pos, self.cards.len()) {
            Some(i) => self.tap_card(i, &layout, now),
            None => Vec::new(),
        }
    }

    fn tap_card(&mut self, i: usize, layout: &GridLayout, now: f64) -> Vec<GameEvent> {
        if self.locked || self.cards[i].matched || self.selected == Some(i) {
            return Vec::new();
        }
        let mut events = vec![GameEvent::Sound(SoundEffect::Click)];

        let Some(first) = self.selected else {
            self.selected = Some(i);
            return events;
        };

        if self.cards[first].glyph == self.cards[i].glyph {
            let glyph = self.cards[i].glyph;
            self.cards[first].matched = true;
            self.cards[i].matched = true;
            self.matched += 2;
            self.selected = None;
            log::debug!("Matched {} ({}/{})", glyph, self.matched, self.cards.len());

            events.extend([
                GameEvent::Sound(SoundEffect::Match),
                GameEvent::Collected(glyph.to_string()),
                GameEvent::PointEffect(layout.card_center(i)),
            ]);
            if self.all_matched() {
                self.timers
                    .after(now, MATCH_CELEBRATE_DELAY_MS, MatchAction::Celebrate);
            }
        } else {
            self.locked = true;
            self.mismatch = Some((first, i));
            events.push(GameEvent::Sound(SoundEffect::TryAgain));
            self.timers
                .after(now, MATCH_MISMATCH_REVEAL_MS, MatchAction::HideMismatch);
        }
        events
    }

    pub fn update(&mut self, settings: &DifficultySettings, now: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for action in self.timers.take_due(now) {
            match action {
                MatchAction::HideMismatch => {
                    self.selected = None;
                    self.mismatch = None;
                    self.locked = false;
                }
                MatchAction::Celebrate => {
                    self.earned_stars += 1;
                    log::info!("Pairs level {} cleared", self.level + 1);
                    events.extend([
                        GameEvent::Sound(SoundEffect::Success),
                        GameEvent::Sound(SoundEffect::Encouragement),
                        GameEvent::Celebrate,
                        GameEvent::StarEarned,
                        GameEvent::Completed(TrackedGame::Match),
                    ]);
                    self.timers
                        .after(now, MATCH_NEW_DECK_DELAY_MS, MatchAction::NewDeck);
                }
                MatchAction::NewDeck => {
                    self.level += 1;
                    self.cards = deal(settings.match_pairs, &mut self.rng);
                    self.selected = None;
                    self.mismatch = None;
                    self.matched = 0;
                    self.locked = false;
                }
            }
        }
        events
    }
}
