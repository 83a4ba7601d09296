//! Word store collaborator
//!
//! The store owns the vocabulary and the per-date secret assignments.
//! Values cross this boundary as raw strings; the oracle validates them.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("word store unavailable: {0}")]
    Unavailable(String),
    #[error("could not assign a daily word: {0}")]
    AssignmentFailed(String),
    #[error("word store has no words")]
    Empty,
    #[error("No valid 5-letter words provided")]
    NoValidWords,
    #[error("word store returned an invalid word: {0:?}")]
    InvalidWord(String),
    #[error("word store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("word store data is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Backing store for words and daily assignments
pub trait WordStore {
    /// Authoritative current date
    fn today(&self) -> NaiveDate;

    /// The secret for `date`, assigning one if none exists yet
    ///
    /// Repeated calls for the same date return the same word.
    ///
    /// # Errors
    /// Fails when the store is unreachable or no word can be assigned.
    fn daily_word(&mut self, date: NaiveDate) -> Result<String, StoreError>;

    /// Bounds recorded alongside the assignment for `date`, if any
    ///
    /// # Errors
    /// Fails when the store is unreachable.
    fn initial_bounds(&self, date: NaiveDate) -> Result<Option<(String, String)>, StoreError>;

    /// One page of the vocabulary, in insertion order
    ///
    /// A page shorter than `page_size` is the last one.
    ///
    /// # Errors
    /// Fails when the store is unreachable.
    fn words_page(&self, page: usize, page_size: usize) -> Result<Vec<String>, StoreError>;

    /// The most recently added word
    ///
    /// # Errors
    /// Fails when the store is unreachable or empty.
    fn random_word(&self) -> Result<String, StoreError>;
}
