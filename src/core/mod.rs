//! Core domain types for the puzzle
//!
//! This module contains the fundamental value types with no I/O.
//! All types here are pure, testable, and cheap to copy or clone.

mod dictionary;
mod guess;
mod letters;
mod word;

pub use dictionary::Dictionary;
pub use guess::{AutoFill, GuessRow};
pub use letters::{ALPHABET, LetterSet};
pub use word::{WORD_LEN, Word, WordError};
