//! File-backed word store
//!
//! Keeps the vocabulary and the per-date assignments in one JSON document:
//!
//! ```json
//! {
//!   "words": [{ "word": "apple", "used": false }],
//!   "daily": { "2024-01-01": { "word": "peach", "initial_top": "mango", "initial_bottom": "table" } }
//! }
//! ```

use super::clock::{Clock, SystemClock};
use super::store::{StoreError, WordStore};
use crate::core::{Dictionary, Word};
use crate::engine::derive_bounds;
use crate::wordlists::loader::parse_words;
use chrono::NaiveDate;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The secret and starting bounds chosen for one date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyAssignment {
    pub word: Word,
    pub initial_top: Word,
    pub initial_bottom: Word,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredWord {
    word: Word,
    #[serde(default)]
    used: bool,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    words: Vec<StoredWord>,
    #[serde(default)]
    daily: BTreeMap<NaiveDate, DailyAssignment>,
}

/// Outcome of adding words to the store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddWordsReport {
    pub added: usize,
    pub duplicates: usize,
}

/// Word store persisted as a single JSON file
///
/// A missing file starts an empty store. A file that cannot be read or
/// parsed leaves the store unavailable: every call fails and the file is
/// never overwritten.
#[derive(Debug)]
pub struct LocalWordStore<C = SystemClock> {
    path: PathBuf,
    data: StoreData,
    broken: Option<String>,
    clock: C,
    rng: StdRng,
}

impl<C: Clock> LocalWordStore<C> {
    #[must_use]
    pub fn open(path: impl Into<PathBuf>, clock: C) -> Self {
        let path = path.into();
        let (data, broken) = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<StoreData>(&raw) {
                Ok(data) => (data, None),
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Word store file is malformed: {}", e);
                    (StoreData::default(), Some(e.to_string()))
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => (StoreData::default(), None),
            Err(e) => {
                tracing::warn!(path = %path.display(), "Failed to read word store: {}", e);
                (StoreData::default(), Some(e.to_string()))
            }
        };

        tracing::debug!(
            words = data.words.len(),
            assignments = data.daily.len(),
            "Word store opened at {:?}",
            path
        );

        Self {
            path,
            data,
            broken,
            clock,
            rng: StdRng::from_rng(&mut rand::rng()),
        }
    }

    /// Make assignments reproducible
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.words.is_empty()
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.broken.is_none()
    }

    /// Words not yet used as a daily secret
    #[must_use]
    pub fn unused_count(&self) -> usize {
        self.data.words.iter().filter(|w| !w.used).count()
    }

    /// The assignment already made for `date`
    #[must_use]
    pub fn assignment(&self, date: NaiveDate) -> Option<DailyAssignment> {
        self.data.daily.get(&date).copied()
    }

    /// Fill an empty store with `words`
    ///
    /// Returns how many words were added, zero if the store already had some.
    ///
    /// # Errors
    /// Fails if the store is unavailable or cannot be written.
    pub fn seed_if_empty(&mut self, words: &[Word]) -> Result<usize, StoreError> {
        self.ensure_available()?;
        if !self.data.words.is_empty() {
            return Ok(0);
        }
        let report = self.insert_words(words)?;
        tracing::info!(count = report.added, "Seeded empty word store");
        Ok(report.added)
    }

    /// Add words from free-form admin input
    ///
    /// Entries are split on commas and whitespace. Only 5-letter alphabetic
    /// words are kept; words already in the store are counted as duplicates.
    ///
    /// # Errors
    /// `StoreError::NoValidWords` if the input holds no valid word, or a
    /// store failure.
    pub fn add_words(&mut self, input: &str) -> Result<AddWordsReport, StoreError> {
        let words = parse_words(input);
        if words.is_empty() {
            return Err(StoreError::NoValidWords);
        }
        self.insert_words(&words)
    }

    fn insert_words(&mut self, words: &[Word]) -> Result<AddWordsReport, StoreError> {
        self.ensure_available()?;

        let mut known: FxHashSet<Word> = self.data.words.iter().map(|w| w.word).collect();
        let mut report = AddWordsReport::default();
        for &word in words {
            if known.insert(word) {
                self.data.words.push(StoredWord { word, used: false });
                report.added += 1;
            } else {
                report.duplicates += 1;
            }
        }

        if report.added > 0 {
            self.save()?;
        }
        Ok(report)
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        match &self.broken {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.data)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Pick a fresh secret for `date`
    ///
    /// The secret is an unused word with at least one word on each side, so
    /// both initial bounds are real words. Once every such word has been
    /// used the whole list is recycled.
    fn assign(&mut self, date: NaiveDate) -> Result<DailyAssignment, StoreError> {
        let dictionary = Dictionary::new(self.data.words.iter().map(|w| w.word));
        let (Some(&first), Some(&last)) = (dictionary.words().first(), dictionary.words().last())
        else {
            return Err(StoreError::Empty);
        };
        if dictionary.len() < 3 {
            return Err(StoreError::AssignmentFailed(format!(
                "need at least 3 words, have {}",
                dictionary.len()
            )));
        }

        let interior = |w: &&StoredWord| w.word != first && w.word != last;
        let mut candidates: Vec<Word> = self
            .data
            .words
            .iter()
            .filter(|w| !w.used)
            .filter(interior)
            .map(|w| w.word)
            .collect();

        if candidates.is_empty() {
            tracing::info!("Every word has been used; recycling the word list");
            for stored in &mut self.data.words {
                stored.used = false;
            }
            candidates = self
                .data
                .words
                .iter()
                .filter(interior)
                .map(|w| w.word)
                .collect();
        }

        let secret = *candidates
            .choose(&mut self.rng)
            .ok_or_else(|| StoreError::AssignmentFailed("no eligible words".to_string()))?;
        let (initial_top, initial_bottom) = derive_bounds(&dictionary, &secret, &mut self.rng);

        for stored in self.data.words.iter_mut().filter(|w| w.word == secret) {
            stored.used = true;
        }
        let assignment = DailyAssignment {
            word: secret,
            initial_top,
            initial_bottom,
        };
        self.data.daily.insert(date, assignment);

        if let Err(e) = self.save() {
            self.data.daily.remove(&date);
            return Err(e);
        }

        tracing::info!(%date, remaining = self.unused_count(), "Assigned daily word");
        Ok(assignment)
    }
}

impl<C: Clock> WordStore for LocalWordStore<C> {
    fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    fn daily_word(&mut self, date: NaiveDate) -> Result<String, StoreError> {
        self.ensure_available()?;
        let assignment = match self.assignment(date) {
            Some(existing) => existing,
            None => self.assign(date)?,
        };
        Ok(assignment.word.to_string())
    }

    fn initial_bounds(&self, date: NaiveDate) -> Result<Option<(String, String)>, StoreError> {
        self.ensure_available()?;
        Ok(self
            .assignment(date)
            .map(|a| (a.initial_top.to_string(), a.initial_bottom.to_string())))
    }

    fn words_page(&self, page: usize, page_size: usize) -> Result<Vec<String>, StoreError> {
        self.ensure_available()?;
        Ok(self
            .data
            .words
            .iter()
            .skip(page.saturating_mul(page_size))
            .take(page_size)
            .map(|w| w.word.to_string())
            .collect())
    }

    fn random_word(&self) -> Result<String, StoreError> {
        self.ensure_available()?;
        self.data
            .words
            .last()
            .map(|w| w.word.to_string())
            .ok_or(StoreError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::FixedClock;
    use crate::wordlists::loader::words_from_slice;
    use tempfile::TempDir;

    fn day(n: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, n).unwrap()
    }

    fn seeded(dir: &TempDir, words: &[&str]) -> LocalWordStore<FixedClock> {
        let mut store = LocalWordStore::open(dir.path().join("words.json"), FixedClock(day(1)))
            .with_seed(5);
        store.seed_if_empty(&words_from_slice(words)).unwrap();
        store
    }

    #[test]
    fn assignment_is_idempotent_per_date() {
        let dir = TempDir::new().unwrap();
        let mut store = seeded(&dir, &["apple", "mango", "peach", "table", "zebra"]);

        let first = store.daily_word(day(1)).unwrap();
        let again = store.daily_word(day(1)).unwrap();
        assert_eq!(first, again);

        // Survives reopening
        let mut reopened = LocalWordStore::open(store.path(), FixedClock(day(1)));
        assert_eq!(reopened.daily_word(day(1)).unwrap(), first);
    }

    #[test]
    fn secret_always_has_neighbours() {
        let dir = TempDir::new().unwrap();
        let mut store = seeded(&dir, &["apple", "mango", "peach", "table", "zebra"]);

        for n in 1..=20 {
            let secret = store.daily_word(day(n)).unwrap();
            assert_ne!(secret, "apple");
            assert_ne!(secret, "zebra");

            let (top, bottom) = store.initial_bounds(day(n)).unwrap().unwrap();
            assert!(top < secret && secret < bottom);
        }
    }

    #[test]
    fn words_are_recycled_once_used_up() {
        let dir = TempDir::new().unwrap();
        let mut store = seeded(&dir, &["apple", "mango", "zebra"]);

        // Only "mango" is eligible, so it repeats after recycling
        assert_eq!(store.daily_word(day(1)).unwrap(), "mango");
        assert_eq!(store.daily_word(day(2)).unwrap(), "mango");
        assert_eq!(store.unused_count(), 2);
    }

    #[test]
    fn too_few_words_cannot_be_assigned() {
        let dir = TempDir::new().unwrap();
        let mut store = seeded(&dir, &["apple", "zebra"]);
        assert!(matches!(
            store.daily_word(day(1)),
            Err(StoreError::AssignmentFailed(_))
        ));
        assert!(store.assignment(day(1)).is_none());
    }

    #[test]
    fn empty_store_reports_empty() {
        let dir = TempDir::new().unwrap();
        let mut store = LocalWordStore::open(dir.path().join("none.json"), FixedClock(day(1)));
        assert!(matches!(store.daily_word(day(1)), Err(StoreError::Empty)));
        assert!(matches!(store.random_word(), Err(StoreError::Empty)));
        assert!(store.words_page(0, 10).unwrap().is_empty());
    }

    #[test]
    fn random_word_is_most_recent() {
        let dir = TempDir::new().unwrap();
        let mut store = seeded(&dir, &["apple", "mango"]);
        store.add_words("lemon").unwrap();
        assert_eq!(store.random_word().unwrap(), "lemon");
    }

    #[test]
    fn add_words_filters_and_counts() {
        let dir = TempDir::new().unwrap();
        let mut store = seeded(&dir, &["apple"]);

        let report = store.add_words("Chain, chair apple toolong b4dly").unwrap();
        assert_eq!(report, AddWordsReport { added: 2, duplicates: 1 });
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn add_words_without_valid_input_fails() {
        let dir = TempDir::new().unwrap();
        let mut store = seeded(&dir, &["apple"]);
        let err = store.add_words("four, sixsix").unwrap_err();
        assert_eq!(err.to_string(), "No valid 5-letter words provided");
    }

    #[test]
    fn pages_follow_insertion_order() {
        let dir = TempDir::new().unwrap();
        let store = seeded(&dir, &["zebra", "apple", "mango", "peach", "table"]);

        assert_eq!(store.words_page(0, 2).unwrap(), ["zebra", "apple"]);
        assert_eq!(store.words_page(2, 2).unwrap(), ["table"]);
        assert!(store.words_page(3, 2).unwrap().is_empty());
    }

    #[test]
    fn malformed_file_makes_store_unavailable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("words.json");
        fs::write(&path, "{ not json").unwrap();

        let mut store = LocalWordStore::open(&path, FixedClock(day(1)));
        assert!(!store.is_available());
        assert!(matches!(store.daily_word(day(1)), Err(StoreError::Unavailable(_))));
        assert!(store.seed_if_empty(&words_from_slice(&["apple"])).is_err());

        // Left untouched for inspection
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }
}
