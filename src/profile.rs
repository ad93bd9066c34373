//! Player profile
//!
//! Persisted to LocalStorage as one JSON blob. Loading is tolerant: missing
//! fields take their defaults, unknown fields are ignored, and anything that
//! fails to parse starts a fresh profile.

use serde::{Deserialize, Deserializer, Serialize};

use crate::difficulty::{Difficulty, DifficultySettings, settings_for};
use crate::platform::Storage;

/// Games that keep a completion counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedGame {
    Trace,
    Match,
    Path,
}

/// Completion counters per game
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamesCompleted {
    pub trace: u32,
    #[serde(rename = "match")]
    pub pairs: u32,
    pub path: u32,
}

impl GamesCompleted {
    pub fn get(&self, game: TrackedGame) -> u32 {
        match game {
            TrackedGame::Trace => self.trace,
            TrackedGame::Match => self.pairs,
            TrackedGame::Path => self.path,
        }
    }

    fn bump(&mut self, game: TrackedGame) {
        let counter = match game {
            TrackedGame::Trace => &mut self.trace,
            TrackedGame::Match => &mut self.pairs,
            TrackedGame::Path => &mut self.path,
        };
        *counter = counter.saturating_add(1);
    }
}

/// Everything that survives between sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    #[serde(deserialize_with = "lenient_difficulty")]
    pub difficulty: Difficulty,
    pub sound_enabled: bool,
    /// Collected glyphs in the order they were first collected
    pub collected_animals: Vec<String>,
    pub total_stars: u32,
    pub games_completed: GamesCompleted,
}

/// An unknown tier falls back to the default without losing the other fields
fn lenient_difficulty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Difficulty, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value.clone()).unwrap_or_else(|_| {
        log::warn!("Unknown difficulty {}, using default", value);
        Difficulty::default()
    }))
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            sound_enabled: true,
            collected_animals: Vec::new(),
            total_stars: 0,
            games_completed: GamesCompleted::default(),
        }
    }
}

impl Profile {
    /// Parse a stored blob, falling back to defaults on any error
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Profile>(json) {
            Ok(mut profile) => {
                profile.dedupe_collection();
                profile
            }
            Err(e) => {
                log::warn!("Stored profile unreadable ({}), starting fresh", e);
                Self::default()
            }
        }
    }

    /// Drop repeated glyphs, keeping first occurrences
    fn dedupe_collection(&mut self) {
        let mut seen = Vec::with_capacity(self.collected_animals.len());
        self.collected_animals.retain(|glyph| {
            if seen.contains(glyph) {
                false
            } else {
                seen.push(glyph.clone());
                true
            }
        });
    }
}

/// Profile plus the storage it is written through
pub struct ProfileStore {
    profile: Profile,
    storage: Box<dyn Storage>,
}

impl ProfileStore {
    /// Storage key for the profile blob
    pub const STORAGE_KEY: &'static str = "animal-fun-state";

    /// Load the profile from `storage` (defaults if absent, unreadable or malformed)
    pub fn load(storage: Box<dyn Storage>) -> Self {
        let profile = match storage.get_item(Self::STORAGE_KEY) {
            Ok(Some(json)) => {
                let profile = Profile::from_json(&json);
                log::info!(
                    "Loaded profile: {} stars, {} animals, {}",
                    profile.total_stars,
                    profile.collected_animals.len(),
                    profile.difficulty.as_str()
                );
                profile
            }
            Ok(None) => {
                log::info!("No saved profile, starting fresh");
                Profile::default()
            }
            Err(e) => {
                log::warn!("Could not read profile: {}", e);
                Profile::default()
            }
        };
        Self { profile, storage }
    }

    /// Write the profile back (best effort)
    fn save(&mut self) {
        let json = match serde_json::to_string(&self.profile) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize profile: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set_item(Self::STORAGE_KEY, &json) {
            log::warn!("Profile not saved: {}", e);
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn difficulty(&self) -> Difficulty {
        self.profile.difficulty
    }

    /// Tuning for the current difficulty
    pub fn settings(&self) -> DifficultySettings {
        settings_for(self.profile.difficulty)
    }

    pub fn sound_enabled(&self) -> bool {
        self.profile.sound_enabled
    }

    pub fn collected_animals(&self) -> &[String] {
        &self.profile.collected_animals
    }

    pub fn total_stars(&self) -> u32 {
        self.profile.total_stars
    }

    pub fn games_completed(&self, game: TrackedGame) -> u32 {
        self.profile.games_completed.get(game)
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.profile.difficulty = difficulty;
        self.save();
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.profile.sound_enabled = enabled;
        self.save();
    }

    /// Add a glyph to the collection; returns false if it was already there
    pub fn collect_animal(&mut self, glyph: &str) -> bool {
        if self.profile.collected_animals.iter().any(|g| g == glyph) {
            return false;
        }
        self.profile.collected_animals.push(glyph.to_string());
        self.save();
        true
    }

    pub fn add_stars(&mut self, count: u32) {
        self.profile.total_stars = self.profile.total_stars.saturating_add(count);
        self.save();
    }

    pub fn complete_game(&mut self, game: TrackedGame) {
        self.profile.games_completed.bump(game);
        self.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStorage;
    use proptest::prelude::*;

    fn fresh() -> (ProfileStore, MemoryStorage) {
        let storage = MemoryStorage::new();
        (ProfileStore::load(Box::new(storage.clone())), storage)
    }

    #[test]
    fn test_fresh_profile_defaults() {
        let (store, _) = fresh();
        assert_eq!(store.difficulty(), Difficulty::Easy);
        assert_eq!(store.difficulty().as_str(), "easy");
        assert_eq!(store.total_stars(), 0);
        assert!(store.sound_enabled());
        assert!(store.collected_animals().is_empty());
        assert_eq!(store.games_completed(TrackedGame::Match), 0);
    }

    #[test]
    fn test_collect_twice_keeps_one() {
        let (mut store, _) = fresh();
        assert!(store.collect_animal("🐱"));
        assert!(!store.collect_animal("🐱"));
        assert_eq!(store.collected_animals(), ["🐱".to_string()]);
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let (mut store, storage) = fresh();
        store.add_stars(2);
        store.complete_game(TrackedGame::Path);
        store.set_difficulty(Difficulty::Hard);

        let reloaded = ProfileStore::load(Box::new(storage.clone()));
        assert_eq!(reloaded.total_stars(), 2);
        assert_eq!(reloaded.games_completed(TrackedGame::Path), 1);
        assert_eq!(reloaded.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn test_blob_uses_camel_case_field_names() {
        let (mut store, storage) = fresh();
        store.collect_animal("🐶");
        store.complete_game(TrackedGame::Match);
        let json = storage.peek(ProfileStore::STORAGE_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["difficulty"], "easy");
        assert_eq!(value["soundEnabled"], true);
        assert_eq!(value["collectedAnimals"][0], "🐶");
        assert_eq!(value["totalStars"], 0);
        assert_eq!(value["gamesCompleted"]["match"], 1);
    }

    #[test]
    fn test_malformed_blob_falls_back_to_defaults() {
        let storage = MemoryStorage::new();
        storage.insert_raw(ProfileStore::STORAGE_KEY, "{not json at all");
        let store = ProfileStore::load(Box::new(storage));
        assert_eq!(store.profile(), &Profile::default());
    }

    #[test]
    fn test_partial_blob_merges_over_defaults() {
        let storage = MemoryStorage::new();
        storage.insert_raw(
            ProfileStore::STORAGE_KEY,
            r#"{"totalStars": 7, "gamesCompleted": {"trace": 3}, "someFutureField": 1}"#,
        );
        let store = ProfileStore::load(Box::new(storage));
        assert_eq!(store.total_stars(), 7);
        assert_eq!(store.games_completed(TrackedGame::Trace), 3);
        assert_eq!(store.games_completed(TrackedGame::Path), 0);
        assert_eq!(store.difficulty(), Difficulty::Easy);
        assert!(store.sound_enabled());
    }

    #[test]
    fn test_unknown_difficulty_keeps_other_fields() {
        let profile = Profile::from_json(
            r#"{"difficulty": "expert", "totalStars": 9, "collectedAnimals": ["🐶"]}"#,
        );
        assert_eq!(profile.difficulty, Difficulty::Easy);
        assert_eq!(profile.total_stars, 9);
        assert_eq!(profile.collected_animals, vec!["🐶"]);

        let profile = Profile::from_json(r#"{"difficulty": 3, "soundEnabled": false}"#);
        assert_eq!(profile.difficulty, Difficulty::Easy);
        assert!(!profile.sound_enabled);
    }

    #[test]
    fn test_duplicate_glyphs_in_blob_are_dropped() {
        let profile = Profile::from_json(r#"{"collectedAnimals": ["🐱", "🐶", "🐱"]}"#);
        assert_eq!(profile.collected_animals, vec!["🐱", "🐶"]);
    }

    #[test]
    fn test_write_failure_keeps_in_memory_state() {
        let mut store = ProfileStore::load(Box::new(MemoryStorage::read_only()));
        store.add_stars(1);
        store.collect_animal("🐰");
        assert_eq!(store.total_stars(), 1);
        assert_eq!(store.collected_animals().len(), 1);
    }

    fn arb_profile() -> impl Strategy<Value = Profile> {
        (
            prop::sample::select(Difficulty::ALL.to_vec()),
            any::<bool>(),
            prop::collection::btree_set("[a-z🐱🐶🐰]{1,3}", 0..8),
            any::<u32>(),
            (any::<u32>(), any::<u32>(), any::<u32>()),
        )
            .prop_map(|(difficulty, sound_enabled, glyphs, total_stars, (t, m, p))| Profile {
                difficulty,
                sound_enabled,
                collected_animals: glyphs.into_iter().collect(),
                total_stars,
                games_completed: GamesCompleted {
                    trace: t,
                    pairs: m,
                    path: p,
                },
            })
    }

    proptest! {
        #[test]
        fn prop_profile_round_trips(profile in arb_profile()) {
            let json = serde_json::to_string(&profile).unwrap();
            prop_assert_eq!(Profile::from_json(&json), profile);
        }
    }
}
