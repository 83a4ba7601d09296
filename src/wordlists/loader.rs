//! Word list loading utilities
//!
//! Lists may come from a file (one word per line, or separated by commas
//! and whitespace) or from the embedded constants.

use crate::core::Word;
use rustc_hash::FxHashSet;
use std::fs;
use std::io;
use std::path::Path;

/// Load words from a file
///
/// Returns valid words in file order, skipping invalid entries and repeats.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
///
/// # Examples
/// ```no_run
/// use frantic_five::wordlists::loader::load_from_file;
///
/// let words = load_from_file("data/words.txt").unwrap();
/// println!("Loaded {} words", words.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Word>> {
    let content = fs::read_to_string(path)?;
    Ok(parse_words(&content))
}

/// Split free-form text into unique valid words
///
/// Entries are separated by commas or whitespace and lowercased. Anything
/// that is not exactly five ASCII letters is dropped.
///
/// # Examples
/// ```
/// use frantic_five::wordlists::loader::parse_words;
///
/// let words = parse_words("Apple, mango\nPEACH apple toolong");
/// let text: Vec<_> = words.iter().map(|w| w.as_str()).collect();
/// assert_eq!(text, ["apple", "mango", "peach"]);
/// ```
#[must_use]
pub fn parse_words(text: &str) -> Vec<Word> {
    let mut seen = FxHashSet::default();
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|entry| !entry.is_empty())
        .filter_map(|entry| Word::new(entry).ok())
        .filter(|word| seen.insert(*word))
        .collect()
}

/// Convert embedded string slice to Word vector
///
/// # Examples
/// ```
/// use frantic_five::wordlists::loader::words_from_slice;
/// use frantic_five::wordlists::FALLBACK_WORDS;
///
/// let words = words_from_slice(FALLBACK_WORDS);
/// assert_eq!(words.len(), FALLBACK_WORDS.len());
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<Word> {
    slice.iter().filter_map(|&s| Word::new(s).ok()).collect()
}
