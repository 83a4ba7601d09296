//! Valid-guess vocabulary
//!
//! Holds the words both as a hash set (membership checks on every
//! submission) and as a sorted vector (range queries for bound derivation
//! and simulation).

use super::Word;
use rustc_hash::FxHashSet;

/// A set of valid guess words kept in alphabetical order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    lookup: FxHashSet<Word>,
    sorted: Vec<Word>,
}

impl Dictionary {
    #[must_use]
    pub fn new(words: impl IntoIterator<Item = Word>) -> Self {
        let mut dictionary = Self::default();
        dictionary.extend(words);
        dictionary
    }

    /// Build from raw strings, skipping anything that is not a valid word
    #[must_use]
    pub fn from_strs<S: AsRef<str>>(words: &[S]) -> Self {
        Self::new(words.iter().filter_map(|w| Word::new(w).ok()))
    }

    #[must_use]
    pub fn contains(&self, word: &Word) -> bool {
        self.lookup.contains(word)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// All words in alphabetical order
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.sorted
    }

    /// Words strictly less than `word`
    #[must_use]
    pub fn before(&self, word: &Word) -> &[Word] {
        let end = self.sorted.partition_point(|w| w < word);
        &self.sorted[..end]
    }

    /// Words strictly greater than `word`
    #[must_use]
    pub fn after(&self, word: &Word) -> &[Word] {
        let start = self.sorted.partition_point(|w| w <= word);
        &self.sorted[start..]
    }

    /// Words strictly between `low` and `high`
    #[must_use]
    pub fn between(&self, low: &Word, high: &Word) -> &[Word] {
        let start = self.sorted.partition_point(|w| w <= low);
        let end = self.sorted.partition_point(|w| w < high).max(start);
        &self.sorted[start..end]
    }

    /// Add a single word, returning `true` if it was new
    pub fn insert(&mut self, word: Word) -> bool {
        if !self.lookup.insert(word) {
            return false;
        }
        let at = self.sorted.partition_point(|w| *w < word);
        self.sorted.insert(at, word);
        true
    }
}

impl Extend<Word> for Dictionary {
    fn extend<I: IntoIterator<Item = Word>>(&mut self, iter: I) {
        for word in iter {
            if self.lookup.insert(word) {
                self.sorted.push(word);
            }
        }
        self.sorted.sort_unstable();
    }
}

impl FromIterator<Word> for Dictionary {
    fn from_iter<I: IntoIterator<Item = Word>>(iter: I) -> Self {
        Self::new(iter)
    }
}
