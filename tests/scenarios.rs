//! End-to-end scenarios through the public shell API

use animal_fun::platform::{MemoryStorage, PointerInput};
use animal_fun::profile::TrackedGame;
use animal_fun::shell::{Feedback, View};
use animal_fun::{Difficulty, ProfileStore, Shell, ViewKind};
use glam::Vec2;

const CANVAS: Vec2 = Vec2::new(800.0, 500.0);

fn fresh_shell(storage: &MemoryStorage) -> Shell {
    Shell::new(ProfileStore::load(Box::new(storage.clone())), CANVAS, 2024)
}

#[test]
fn fresh_profile_starts_easy_with_no_stars() {
    let storage = MemoryStorage::new();
    let shell = fresh_shell(&storage);
    assert_eq!(shell.difficulty(), Difficulty::Easy);
    assert_eq!(shell.store().total_stars(), 0);
    assert!(shell.store().collected_animals().is_empty());
    assert!(shell.sound_enabled());
}

#[test]
fn collecting_the_same_animal_twice_keeps_one() {
    let storage = MemoryStorage::new();
    let mut store = ProfileStore::load(Box::new(storage.clone()));
    store.collect_animal("🐱");
    store.collect_animal("🐱");
    assert_eq!(store.collected_animals().len(), 1);

    let reloaded = ProfileStore::load(Box::new(storage));
    assert_eq!(reloaded.collected_animals(), ["🐱".to_string()]);
}

#[test]
fn easy_match_deck_has_six_cards() {
    let storage = MemoryStorage::new();
    let mut shell = fresh_shell(&storage);
    shell.select(ViewKind::Match);
    match shell.view() {
        View::Match(game) => assert_eq!(game.cards().len(), 6),
        _ => panic!("expected the match view"),
    }
}

#[test]
fn stroking_along_the_path_completes_it_and_adds_a_star() {
    let storage = MemoryStorage::new();
    let mut shell = fresh_shell(&storage);
    shell.select(ViewKind::Path);

    let (points, animal) = match shell.view() {
        View::Path(game) => (
            (0..=100)
                .map(|k| game.position_on_path(k as f32 / 100.0))
                .collect::<Vec<_>>(),
            game.level().animal,
        ),
        _ => panic!("expected the path view"),
    };

    let mut feedback = shell.pointer(PointerInput::down(points[0].x, points[0].y), 0.0);
    for (i, p) in points.iter().enumerate() {
        feedback.extend(shell.pointer(PointerInput::moved(p.x, p.y), i as f64 * 16.0));
    }

    match shell.view() {
        View::Path(game) => assert!(game.is_completed()),
        _ => panic!("expected the path view"),
    }
    assert_eq!(shell.store().total_stars(), 1);
    assert_eq!(shell.store().games_completed(TrackedGame::Path), 1);
    assert!(shell.store().collected_animals().iter().any(|g| g == animal));
    assert!(feedback.contains(&Feedback::Play(animal_fun::audio::SoundEffect::Success)));

    let saved = ProfileStore::load(Box::new(storage));
    assert_eq!(saved.total_stars(), 1);
}

#[test]
fn malformed_saved_profile_falls_back_to_defaults() {
    let storage = MemoryStorage::new();
    storage.insert_raw(ProfileStore::STORAGE_KEY, "{not json");
    let shell = fresh_shell(&storage);
    assert_eq!(shell.difficulty(), Difficulty::Easy);
    assert_eq!(shell.store().total_stars(), 0);
}

#[test]
fn partial_saved_profile_keeps_known_fields() {
    let storage = MemoryStorage::new();
    storage.insert_raw(
        ProfileStore::STORAGE_KEY,
        r#"{"difficulty":"hard","totalStars":7,"someFutureField":true}"#,
    );
    let mut shell = fresh_shell(&storage);
    assert_eq!(shell.difficulty(), Difficulty::Hard);
    assert_eq!(shell.store().total_stars(), 7);
    assert!(shell.sound_enabled());

    shell.select(ViewKind::Match);
    match shell.view() {
        View::Match(game) => assert_eq!(game.cards().len(), 12),
        _ => panic!("expected the match view"),
    }
}

#[test]
fn storage_that_rejects_writes_does_not_lose_progress_in_memory() {
    let storage = MemoryStorage::read_only();
    let mut shell = fresh_shell(&storage);
    shell.set_difficulty(Difficulty::Medium);
    assert_eq!(shell.difficulty(), Difficulty::Medium);
    assert!(storage.peek(ProfileStore::STORAGE_KEY).is_none());
}
