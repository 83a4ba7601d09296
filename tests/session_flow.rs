//! End-to-end session behaviour over on-disk storage

use chrono::NaiveDate;
use frantic_five::core::{Dictionary, Word};
use frantic_five::engine::{BoundsSnapshot, Event, Outcome, Status};
use frantic_five::oracle::{DictionaryOracle, FixedClock, LocalWordStore};
use frantic_five::session::{Session, SessionConfig};
use frantic_five::storage::{FileStorage, StorageProvider, records};
use frantic_five::wordlists::FALLBACK_WORDS;
use frantic_five::wordlists::loader::words_from_slice;
use std::path::Path;
use std::time::Instant;
use tempfile::TempDir;

type DiskSession = Session<LocalWordStore<FixedClock>, FileStorage>;

fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, n).unwrap()
}

fn open(dir: &Path, date: NaiveDate, seed: u64) -> DiskSession {
    let words = words_from_slice(FALLBACK_WORDS);
    let mut store = LocalWordStore::open(dir.join("words.json"), FixedClock(date)).with_seed(seed);
    store.seed_if_empty(&words).unwrap();
    let oracle = DictionaryOracle::new(store, Dictionary::new(words));
    let storage = FileStorage::open(dir.join("local_storage.json"));
    Session::new(oracle, storage, SessionConfig::default()).with_seed(seed)
}

/// Open the day's range to the whole alphabet so every test has room to guess
fn widen(dir: &Path, date: NaiveDate) {
    let storage = FileStorage::open(dir.join("local_storage.json"));
    let full = BoundsSnapshot {
        top_word: Word::FLOOR,
        bottom_word: Word::CEILING,
        top_word_updated: false,
        bottom_word_updated: false,
    };
    records::save_record(&storage, &records::bounds_key(date), &full);
}

fn secret(session: &DiskSession, date: NaiveDate) -> Word {
    session.oracle().store().assignment(date).unwrap().word
}

/// Type `word` into the free slots and submit it
fn play(session: &mut DiskSession, word: Word) -> Outcome {
    let now = Instant::now();
    for (i, &letter) in word.chars().iter().enumerate() {
        if !session.state().unwrap().guess().is_auto_filled(i) {
            session.dispatch(Event::KeyPress(letter), now);
        }
    }
    session.dispatch(Event::Submit, now)
}

/// A word strictly inside the current range that is not the secret
fn decoy(session: &DiskSession, secret: Word) -> Word {
    let state = session.state().unwrap();
    state
        .dictionary()
        .between(&state.top_word(), &state.bottom_word())
        .iter()
        .copied()
        .find(|&w| w != secret)
        .unwrap()
}

#[test]
fn reload_on_the_same_day_restores_progress() {
    let dir = TempDir::new().unwrap();
    widen(dir.path(), day(1));
    let mut first = open(dir.path(), day(1), 11);
    first.initialize();
    let answer = secret(&first, day(1));

    let guess = decoy(&first, answer);
    let outcome = play(&mut first, guess);
    assert!(matches!(
        outcome,
        Outcome::NarrowedTop | Outcome::NarrowedBottom
    ));
    first.dispatch(Event::PowerUp, Instant::now());

    let before = first.state().unwrap().clone();
    drop(first);

    let mut second = open(dir.path(), day(1), 99);
    second.initialize();
    let after = second.state().unwrap();

    assert_eq!(secret(&second, day(1)), answer);
    assert_eq!(after.top_word(), before.top_word());
    assert_eq!(after.bottom_word(), before.bottom_word());
    assert_eq!(after.attempts(), 1);
    assert_eq!(after.status(), Status::InProgress);
    assert_eq!(after.disabled_letters(), before.disabled_letters());
    assert!(!after.powerup_available());
    assert_eq!(after.bounds_snapshot(), before.bounds_snapshot());
}

#[test]
fn reload_before_any_guess_keeps_the_starting_bounds() {
    let dir = TempDir::new().unwrap();
    let mut first = open(dir.path(), day(1), 1);
    first.initialize();
    let bounds = first.state().unwrap().bounds_snapshot();
    drop(first);

    let mut second = open(dir.path(), day(1), 2);
    second.initialize();
    assert_eq!(second.state().unwrap().bounds_snapshot(), bounds);
}

#[test]
fn new_day_resets_progress() {
    let dir = TempDir::new().unwrap();
    widen(dir.path(), day(1));
    let mut first = open(dir.path(), day(1), 4);
    first.initialize();
    let answer = secret(&first, day(1));
    let guess = decoy(&first, answer);
    play(&mut first, guess);
    first.dispatch(Event::PowerUp, Instant::now());
    drop(first);

    let mut second = open(dir.path(), day(2), 4);
    second.initialize();
    let state = second.state().unwrap();

    assert_eq!(state.date(), day(2));
    assert_eq!(state.attempts(), 0);
    assert_eq!(state.status(), Status::InProgress);
    assert!(state.powerup_available());
    assert!(state.disabled_letters().is_empty());
    assert!(!state.bounds_snapshot().narrowed());

    // Yesterday's bounds are gone
    let storage = FileStorage::open(dir.path().join("local_storage.json"));
    assert!(records::load_bounds(&storage, day(1)).is_none());
    assert_eq!(records::load_session(&storage).unwrap().date, day(2));
}

#[test]
fn finished_game_stays_finished_after_reload() {
    let dir = TempDir::new().unwrap();
    let mut first = open(dir.path(), day(3), 8);
    first.initialize();
    let answer = secret(&first, day(3));

    assert_eq!(play(&mut first, answer), Outcome::Won);
    drop(first);

    let mut second = open(dir.path(), day(3), 8);
    second.initialize();
    let state = second.state().unwrap();
    assert_eq!(state.status(), Status::Won);
    assert_eq!(state.attempts(), 1);
    assert_eq!(state.revealed_secret(), Some(answer));

    // Input is inert once the day is complete
    assert_eq!(
        second.dispatch(Event::KeyPress(b'a'), Instant::now()),
        Outcome::Ignored
    );
}

#[test]
fn stored_records_never_hold_the_secret() {
    let dir = TempDir::new().unwrap();
    widen(dir.path(), day(5));
    let mut session = open(dir.path(), day(5), 21);
    session.initialize();
    let answer = secret(&session, day(5));

    for _ in 0..3 {
        if session.state().unwrap().status() != Status::InProgress {
            break;
        }
        let guess = decoy(&session, answer);
        play(&mut session, guess);
    }
    play(&mut session, answer);
    assert_eq!(session.state().unwrap().status(), Status::Won);

    let raw = std::fs::read_to_string(dir.path().join("local_storage.json")).unwrap();
    assert!(!raw.contains(answer.as_str()), "secret leaked: {raw}");

    let stored = session.storage().load(records::SESSION_KEY).unwrap();
    assert!(stored.contains("\"won\""));
}

#[test]
fn broken_store_with_builtin_list_still_plays() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("words.json"), "{ not json").unwrap();

    let store = LocalWordStore::open(dir.path().join("words.json"), FixedClock(day(1)));
    assert!(!store.is_available());
    let oracle = DictionaryOracle::new(store, Dictionary::from_strs(FALLBACK_WORDS));
    let storage = FileStorage::open(dir.path().join("local_storage.json"));
    let mut session = Session::new(oracle, storage, SessionConfig::default()).with_seed(3);

    session.initialize();
    let view = session.view();
    assert!(view.error.is_none());
    assert_eq!(view.state.unwrap().dictionary().len(), FALLBACK_WORDS.len());

    // The unreadable store file is left alone
    let raw = std::fs::read_to_string(dir.path().join("words.json")).unwrap();
    assert_eq!(raw, "{ not json");
}

#[test]
fn broken_store_without_fallback_stays_in_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("words.json");
    std::fs::write(&path, "{ not json").unwrap();

    let storage = FileStorage::open(dir.path().join("local_storage.json"));
    let store = LocalWordStore::open(&path, FixedClock(day(1)));
    let mut session = Session::new(
        DictionaryOracle::new(store, Dictionary::default()),
        &storage,
        SessionConfig::default(),
    );

    session.initialize();
    assert!(session.view().error.is_some());

    session.retry();
    assert!(session.view().error.is_some());
    assert!(session.state().is_none());
}
