//! Puzzle state owned by the engine

use super::autofill::compute_auto_fill_prefix;
use crate::core::{AutoFill, Dictionary, GuessRow, LetterSet, Word};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Game status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    InProgress,
    Won,
    Exhausted,
}

impl Status {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Exhausted)
    }
}

/// Why a full guess was refused
///
/// Rejections never count as attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Word not found in dictionary")]
    NotInDictionary,
    #[error("Word must come after the top word")]
    NotAfterTop,
    #[error("Word must come before the bottom word")]
    NotBeforeBottom,
}

/// A displayed rejection, tagged with the episode that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback {
    pub rejection: Rejection,
    pub episode: u64,
}

/// The single mutable record of one day's puzzle
///
/// Only the engine's transition functions change it. The invariant
/// `top < secret < bottom` holds for every state produced by
/// [`initialize`](super::initialize) and [`reduce`](super::reduce).
#[derive(Debug, Clone)]
pub struct PuzzleState {
    pub(crate) date: NaiveDate,
    pub(crate) secret: Word,
    pub(crate) top: Word,
    pub(crate) bottom: Word,
    pub(crate) top_updated: bool,
    pub(crate) bottom_updated: bool,
    pub(crate) guess: GuessRow,
    pub(crate) attempts: u32,
    pub(crate) status: Status,
    pub(crate) disabled: LetterSet,
    pub(crate) powerup_used: bool,
    pub(crate) feedback: Option<Feedback>,
    pub(crate) episode: u64,
    pub(crate) max_attempts: Option<u32>,
    pub(crate) dictionary: Arc<Dictionary>,
}

impl PuzzleState {
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub const fn top_word(&self) -> Word {
        self.top
    }

    #[must_use]
    pub const fn bottom_word(&self) -> Word {
        self.bottom
    }

    #[must_use]
    pub const fn guess(&self) -> &GuessRow {
        &self.guess
    }

    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub const fn max_attempts(&self) -> Option<u32> {
        self.max_attempts
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub const fn disabled_letters(&self) -> LetterSet {
        self.disabled
    }

    #[must_use]
    pub const fn powerup_available(&self) -> bool {
        !self.powerup_used && !self.status.is_terminal()
    }

    #[must_use]
    pub const fn feedback(&self) -> Option<Feedback> {
        self.feedback
    }

    /// Text of the rejection currently on display
    #[must_use]
    pub fn feedback_message(&self) -> Option<String> {
        self.feedback.map(|f| f.rejection.to_string())
    }

    #[must_use]
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// The secret word, only once the game has ended
    #[must_use]
    pub const fn revealed_secret(&self) -> Option<Word> {
        if self.status.is_terminal() {
            Some(self.secret)
        } else {
            None
        }
    }

    /// Letters shared by the current bounds, by position
    #[must_use]
    pub fn auto_fill_prefix(&self) -> AutoFill {
        compute_auto_fill_prefix(&self.top, &self.bottom)
    }

    /// Fill empty slots from the common prefix of the bounds
    ///
    /// Idempotent while the bounds and player letters are unchanged.
    pub fn apply_auto_fill(&mut self) -> bool {
        let prefix = self.auto_fill_prefix();
        self.guess.apply_auto_fill(&prefix)
    }

    /// Secret-free record of the current bounds
    #[must_use]
    pub const fn bounds_snapshot(&self) -> BoundsSnapshot {
        BoundsSnapshot {
            top_word: self.top,
            bottom_word: self.bottom,
            top_word_updated: self.top_updated,
            bottom_word_updated: self.bottom_updated,
        }
    }

    /// Secret-free record of session progress
    ///
    /// A finished game stores an empty guess, since the guess row then
    /// spells out the secret.
    #[must_use]
    pub fn session_snapshot(&self) -> SessionSnapshot {
        let guess = if self.status.is_terminal() {
            GuessRow::new()
        } else {
            self.guess
        };
        SessionSnapshot {
            date: self.date,
            status: self.status,
            attempts: self.attempts,
            current_guess: (*guess.slots()).map(|slot| slot.map(char::from)),
            auto_filled_mask: *guess.auto_filled(),
            disabled_letters: self.disabled,
            powerup_used: self.powerup_used,
        }
    }
}

/// Persisted bounds for one date. Never contains the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundsSnapshot {
    pub top_word: Word,
    pub bottom_word: Word,
    pub top_word_updated: bool,
    pub bottom_word_updated: bool,
}

impl BoundsSnapshot {
    /// Whether a prior guess narrowed either bound
    #[must_use]
    pub const fn narrowed(&self) -> bool {
        self.top_word_updated || self.bottom_word_updated
    }
}

/// Persisted progress for mid-game reloads. Never contains the secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub date: NaiveDate,
    pub status: Status,
    pub attempts: u32,
    pub current_guess: [Option<char>; 5],
    pub auto_filled_mask: [bool; 5],
    #[serde(default)]
    pub disabled_letters: LetterSet,
    #[serde(default)]
    pub powerup_used: bool,
}

impl SessionSnapshot {
    /// Rebuild the guess row, dropping anything that is not a lowercase letter
    #[must_use]
    pub fn guess_row(&self) -> GuessRow {
        let slots = self.current_guess.map(|slot| {
            slot.filter(char::is_ascii_lowercase)
                .and_then(|c| u8::try_from(c).ok())
        });
        GuessRow::from_parts(slots, self.auto_filled_mask)
    }
}
