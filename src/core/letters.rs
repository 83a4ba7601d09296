//! Compact set of lowercase letters
//!
//! Used for the keyboard letters removed by the elimination power-up.

use super::Word;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The 26 lowercase ASCII letters in order
pub const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// A set of lowercase ASCII letters stored as a bitmask
///
/// Serializes as a string of its letters in alphabetical order (e.g. `"jqx"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LetterSet {
    bits: u32,
}

#[inline]
fn bit(letter: u8) -> Option<u32> {
    letter
        .is_ascii_lowercase()
        .then(|| 1u32 << (letter - b'a'))
}

impl LetterSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { bits: 0 }
    }

    /// Set of every letter appearing in `word`
    #[must_use]
    pub fn from_word(word: &Word) -> Self {
        word.chars().iter().copied().collect()
    }

    /// Insert a letter, returning `true` if it was not already present
    ///
    /// Anything other than a lowercase ASCII letter is ignored.
    pub fn insert(&mut self, letter: u8) -> bool {
        match bit(letter) {
            Some(mask) if self.bits & mask == 0 => {
                self.bits |= mask;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn contains(&self, letter: u8) -> bool {
        bit(letter).is_some_and(|mask| self.bits & mask != 0)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Letters of the alphabet not in this set
    #[must_use]
    pub const fn complement(self) -> Self {
        Self {
            bits: !self.bits & ((1 << 26) - 1),
        }
    }

    /// Iterate letters in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        ALPHABET.iter().copied().filter(|&l| self.contains(l))
    }
}

impl FromIterator<u8> for LetterSet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        let mut set = Self::new();
        for letter in iter {
            set.insert(letter.to_ascii_lowercase());
        }
        set
    }
}

impl From<String> for LetterSet {
    fn from(value: String) -> Self {
        value.bytes().collect()
    }
}

impl From<LetterSet> for String {
    fn from(set: LetterSet) -> Self {
        set.to_string()
    }
}

impl fmt::Display for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.iter() {
            write!(f, "{}", char::from(letter))?;
        }
        Ok(())
    }
}
