//! Letter-elimination power-up

use crate::core::{LetterSet, Word};
use rand::Rng;
use rand::seq::IndexedRandom;

/// Letters removed per use
pub const LETTERS_PER_POWERUP: usize = 3;

/// Choose up to three letters to disable
///
/// Candidates are letters absent from `secret` and not already disabled.
/// Selection is uniform without replacement; with fewer than three
/// candidates all of them are returned.
pub fn eliminate_letters<R: Rng + ?Sized>(
    secret: &Word,
    disabled: LetterSet,
    rng: &mut R,
) -> LetterSet {
    let eligible: Vec<u8> = LetterSet::from_word(secret)
        .union(disabled)
        .complement()
        .iter()
        .collect();

    eligible
        .choose_multiple(rng, LETTERS_PER_POWERUP)
        .copied()
        .collect()
}
