//! Puzzle word representation
//!
//! A Word stores a validated 5-letter lowercase ASCII word. Words order
//! byte-wise, which for lowercase ASCII is plain alphabetical order.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of letters in every puzzle word
pub const WORD_LEN: usize = 5;

/// A 5-letter puzzle word
///
/// Stored as bytes so it is `Copy` and cheap to compare. The derived `Ord`
/// compares the byte arrays lexicographically, matching string order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word {
    chars: [u8; WORD_LEN],
}

/// Error type for invalid words
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WordError {
    #[error("Word must be exactly 5 letters, got {0}")]
    InvalidLength(usize),
    #[error("Word must contain only ASCII letters")]
    NonAscii,
    #[error("Word contains invalid characters")]
    InvalidCharacters,
}

impl Word {
    /// Lowest possible bound, used when no dictionary word precedes the secret
    pub const FLOOR: Self = Self {
        chars: [b'a'; WORD_LEN],
    };

    /// Highest possible bound, used when no dictionary word follows the secret
    pub const CEILING: Self = Self {
        chars: [b'z'; WORD_LEN],
    };

    /// Create a new Word from a string
    ///
    /// Input is lowercased and trimmed before validation.
    ///
    /// # Errors
    /// Returns `WordError` if:
    /// - Length is not exactly 5
    /// - Contains non-ASCII characters
    /// - Contains non-alphabetic characters
    ///
    /// # Examples
    /// ```
    /// use frantic_five::core::Word;
    ///
    /// let word = Word::new("Peach").unwrap();
    /// assert_eq!(word.as_str(), "peach");
    ///
    /// assert!(Word::new("too long").is_err());
    /// assert!(Word::new("sh0rt").is_err());
    /// ```
    pub fn new(text: impl AsRef<str>) -> Result<Self, WordError> {
        let text = text.as_ref().trim();

        if !text.is_ascii() {
            return Err(WordError::NonAscii);
        }

        let chars: [u8; WORD_LEN] = text
            .as_bytes()
            .try_into()
            .map_err(|_| WordError::InvalidLength(text.len()))?;

        Self::from_letters(chars)
    }

    /// Create a Word from raw letter bytes, lowercasing them
    ///
    /// # Errors
    /// Returns `WordError::InvalidCharacters` if any byte is not an ASCII letter.
    pub fn from_letters(mut chars: [u8; WORD_LEN]) -> Result<Self, WordError> {
        for ch in &mut chars {
            if !ch.is_ascii_alphabetic() {
                return Err(WordError::InvalidCharacters);
            }
            ch.make_ascii_lowercase();
        }
        Ok(Self { chars })
    }

    /// Get the word as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Validated as ASCII on construction
        std::str::from_utf8(&self.chars).unwrap_or_default()
    }

    /// Get the word as a byte array
    #[inline]
    #[must_use]
    pub const fn chars(&self) -> &[u8; WORD_LEN] {
        &self.chars
    }

    /// Get the character at a specific position (0-4)
    ///
    /// # Panics
    /// Panics if position >= 5
    #[inline]
    #[must_use]
    pub const fn char_at(&self, position: usize) -> u8 {
        self.chars[position]
    }

    /// Check if the word contains a specific letter
    #[inline]
    #[must_use]
    pub fn has_letter(&self, letter: u8) -> bool {
        self.chars.contains(&letter)
    }

    /// Length of the prefix shared with `other`
    #[must_use]
    pub fn common_prefix_len(&self, other: &Self) -> usize {
        self.chars
            .iter()
            .zip(other.chars.iter())
            .take_while(|(a, b)| a == b)
            .count()
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Word {
    type Error = WordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.as_str().to_string()
    }
}

impl PartialEq<&str> for Word {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}
