//! Formatting utilities for terminal output

use crate::core::{GuessRow, Word};
use chrono::NaiveDate;

/// Letters of a word spaced out in upper case, e.g. `P E A C H`
#[must_use]
pub fn tiles(word: &Word) -> String {
    spaced(word.chars().iter().map(|&c| char::from(c)))
}

/// The guess row with `_` for empty slots, e.g. `P E A _ _`
#[must_use]
pub fn guess_tiles(row: &GuessRow) -> String {
    spaced(row.slots().iter().map(|slot| slot.map_or('_', char::from)))
}

fn spaced(letters: impl Iterator<Item = char>) -> String {
    letters
        .map(|c| c.to_ascii_uppercase().to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Pick the singular or plural form for `count`
#[must_use]
pub const fn pluralize<'a>(count: u32, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 { singular } else { plural }
}

/// Message shown once the secret is found
#[must_use]
pub fn congrats_message(secret: &Word, attempts: u32) -> String {
    format!(
        "Congratulations! You found the secret word {} in {attempts} {}!",
        secret.as_str().to_uppercase(),
        pluralize(attempts, "attempt", "attempts")
    )
}

/// Reminder shown on a finished puzzle
pub const COME_BACK_MESSAGE: &str = "Come back tomorrow for a new word!";

/// Spoiler-free result line for sharing
#[must_use]
pub fn share_text(date: NaiveDate, attempts: u32) -> String {
    format!(
        "Frantic Five {} - Found in {attempts} {}!",
        date.format("%-m/%-d/%Y"),
        pluralize(attempts, "try", "tries")
    )
}

/// Message shown when the attempt limit runs out
#[must_use]
pub fn exhausted_message(secret: &Word, attempts: u32) -> String {
    format!(
        "Out of attempts after {attempts} {}. The word was {}.",
        pluralize(attempts, "guess", "guesses"),
        secret.as_str().to_uppercase()
    )
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    // Cast is safe: values are clamped to [0, width]
    let filled = if max > 0.0 {
        ((value / max) * width as f64) as usize
    } else {
        0
    };
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}
