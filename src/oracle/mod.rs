//! Dictionary oracle
//!
//! Thin adapter between the puzzle and a [`WordStore`]: validates what the
//! store returns, assembles the paginated vocabulary into one
//! [`Dictionary`], and falls back to the built-in list when the store
//! cannot supply one.

mod clock;
mod local;
mod store;

pub use clock::{Clock, DEFAULT_UTC_OFFSET_HOURS, FixedClock, SystemClock};
pub use local::{AddWordsReport, DailyAssignment, LocalWordStore};
pub use store::{StoreError, WordStore};

use crate::core::{Dictionary, Word};
use chrono::NaiveDate;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Words requested per dictionary page
pub const DEFAULT_PAGE_SIZE: usize = 1000;

pub struct DictionaryOracle<S> {
    store: S,
    fallback: Dictionary,
    page_size: usize,
}

impl<S: WordStore> DictionaryOracle<S> {
    #[must_use]
    pub fn new(store: S, fallback: Dictionary) -> Self {
        Self {
            store,
            fallback,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Built-in vocabulary used when the store fails
    #[must_use]
    pub const fn fallback(&self) -> &Dictionary {
        &self.fallback
    }

    /// The authoritative "today"
    #[must_use]
    pub fn current_date(&self) -> NaiveDate {
        self.store.today()
    }

    /// The secret assigned to `date`, created by the store if needed
    ///
    /// # Errors
    /// Surfaces the store's error, or `InvalidWord` if it returned
    /// something that is not a 5-letter word.
    pub fn fetch_daily_secret(&mut self, date: NaiveDate) -> Result<Word, StoreError> {
        let raw = self.store.daily_word(date)?;
        parse(raw)
    }

    /// Bounds the store computed when it assigned `date`
    ///
    /// # Errors
    /// Surfaces the store's error or an invalid bound.
    pub fn fetch_initial_bounds(&self, date: NaiveDate) -> Result<Option<(Word, Word)>, StoreError> {
        match self.store.initial_bounds(date)? {
            Some((top, bottom)) => Ok(Some((parse(top)?, parse(bottom)?))),
            None => Ok(None),
        }
    }

    /// The full vocabulary merged with the built-in list
    ///
    /// Pages are requested until a short or empty page arrives. If any page
    /// fails, or the store has no words, the built-in list is used alone.
    /// Entries that are not valid words are skipped.
    #[must_use]
    pub fn fetch_dictionary(&self) -> Dictionary {
        let mut words = Vec::new();
        let mut page = 0;
        loop {
            match self.store.words_page(page, self.page_size) {
                Ok(batch) => {
                    let last = batch.len() < self.page_size;
                    words.extend(batch);
                    if last {
                        break;
                    }
                    page += 1;
                }
                Err(e) => {
                    tracing::warn!(page, "Dictionary fetch failed, using built-in list: {}", e);
                    return self.fallback.clone();
                }
            }
        }

        let mut dictionary: Dictionary = words
            .iter()
            .filter_map(|raw| match Word::new(raw) {
                Ok(word) => Some(word),
                Err(e) => {
                    tracing::debug!(raw = %raw, "Skipping invalid dictionary entry: {}", e);
                    None
                }
            })
            .collect();

        if dictionary.is_empty() {
            tracing::warn!("Word store returned no words, using built-in list");
            return self.fallback.clone();
        }

        let remote = dictionary.len();
        dictionary.extend(self.fallback.words().iter().copied());
        tracing::debug!(remote, total = dictionary.len(), pages = page + 1, "Dictionary loaded");
        dictionary
    }

    /// Last-resort secret from the store
    ///
    /// # Errors
    /// Surfaces the store's error or an invalid word.
    pub fn fetch_random_word(&self) -> Result<Word, StoreError> {
        parse(self.store.random_word()?)
    }

    /// A random word from the built-in list
    pub fn fallback_word<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Word> {
        self.fallback.words().choose(rng).copied()
    }
}

fn parse(raw: String) -> Result<Word, StoreError> {
    match Word::new(&raw) {
        Ok(word) => Ok(word),
        Err(_) => Err(StoreError::InvalidWord(raw)),
    }
}
