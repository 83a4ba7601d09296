//! The row of letter slots the player types into
//!
//! Each slot is empty or holds one lowercase letter. Slots filled from the
//! shared prefix of the bounds are marked auto-filled and cannot be edited
//! by the player.

use super::word::{WORD_LEN, Word};

/// Letters pre-filled from the common prefix of the bounds, by position
pub type AutoFill = [Option<u8>; WORD_LEN];

/// Current guess: 5 optional letters plus the auto-filled mask
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GuessRow {
    slots: [Option<u8>; WORD_LEN],
    auto_filled: [bool; WORD_LEN],
}

impl GuessRow {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [None; WORD_LEN],
            auto_filled: [false; WORD_LEN],
        }
    }

    /// A row showing `word` in full, with nothing auto-filled
    #[must_use]
    pub fn revealed(word: &Word) -> Self {
        let mut row = Self::new();
        for (slot, &ch) in row.slots.iter_mut().zip(word.chars()) {
            *slot = Some(ch);
        }
        row
    }

    /// Rebuild a row from stored slots and mask
    ///
    /// A mask bit on an empty slot is dropped.
    #[must_use]
    pub fn from_parts(slots: [Option<u8>; WORD_LEN], mask: [bool; WORD_LEN]) -> Self {
        let mut auto_filled = [false; WORD_LEN];
        for (i, flag) in auto_filled.iter_mut().enumerate() {
            *flag = mask[i] && slots[i].is_some();
        }
        Self { slots, auto_filled }
    }

    #[must_use]
    pub const fn slots(&self) -> &[Option<u8>; WORD_LEN] {
        &self.slots
    }

    #[must_use]
    pub const fn auto_filled(&self) -> &[bool; WORD_LEN] {
        &self.auto_filled
    }

    #[must_use]
    pub fn is_auto_filled(&self, index: usize) -> bool {
        self.auto_filled.get(index).copied().unwrap_or(false)
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Count of slots the player has typed into (not auto-filled)
    #[must_use]
    pub fn player_filled_count(&self) -> usize {
        self.slots
            .iter()
            .zip(self.auto_filled.iter())
            .filter(|(slot, auto)| slot.is_some() && !**auto)
            .count()
    }

    /// The guessed word once every slot is filled
    #[must_use]
    pub fn to_word(&self) -> Option<Word> {
        let mut chars = [0u8; WORD_LEN];
        for (out, slot) in chars.iter_mut().zip(self.slots.iter()) {
            *out = (*slot)?;
        }
        Word::from_letters(chars).ok()
    }

    /// Fill the first empty slot with `letter`
    ///
    /// Auto-filled slots are never empty, so they are skipped naturally.
    /// Returns `false` if every slot is occupied.
    pub fn push(&mut self, letter: u8) -> bool {
        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(letter);
                true
            }
            None => false,
        }
    }

    /// Clear the rightmost slot that is filled and not auto-filled
    pub fn backspace(&mut self) -> bool {
        let target = (0..WORD_LEN)
            .rev()
            .find(|&i| self.slots[i].is_some() && !self.auto_filled[i]);
        match target {
            Some(i) => {
                self.slots[i] = None;
                true
            }
            None => false,
        }
    }

    /// Clear the slot at `index` unless it is empty, auto-filled, or out of range
    pub fn remove_at(&mut self, index: usize) -> bool {
        if index >= WORD_LEN || self.auto_filled[index] || self.slots[index].is_none() {
            return false;
        }
        self.slots[index] = None;
        true
    }

    /// Empty every slot and drop the auto-filled mask
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Fill empty slots from `prefix`, marking them auto-filled
    ///
    /// Never overwrites a slot that already holds a letter. Returns whether
    /// any slot changed.
    pub fn apply_auto_fill(&mut self, prefix: &AutoFill) -> bool {
        let mut changed = false;
        for (i, letter) in prefix.iter().enumerate() {
            if let (None, Some(letter)) = (self.slots[i], letter) {
                self.slots[i] = Some(*letter);
                self.auto_filled[i] = true;
                changed = true;
            }
        }
        changed
    }
}
