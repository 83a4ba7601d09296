//! Common-prefix auto-fill
//!
//! The secret lies strictly between the bounds, so it shares their common
//! prefix. Pre-filling those letters reveals nothing new.

use crate::core::{AutoFill, WORD_LEN, Word};

/// Letters of the maximal common prefix of `top` and `bottom`
///
/// Positions past the first mismatch are `None`.
///
/// # Examples
/// ```
/// use frantic_five::core::Word;
/// use frantic_five::engine::compute_auto_fill_prefix;
///
/// let top = Word::new("peace").unwrap();
/// let bottom = Word::new("pearl").unwrap();
/// let prefix = compute_auto_fill_prefix(&top, &bottom);
/// assert_eq!(prefix, [Some(b'p'), Some(b'e'), Some(b'a'), None, None]);
/// ```
#[must_use]
pub fn compute_auto_fill_prefix(top: &Word, bottom: &Word) -> AutoFill {
    let shared = top.common_prefix_len(bottom);
    let mut prefix = [None; WORD_LEN];
    for (i, slot) in prefix.iter_mut().enumerate().take(shared) {
        *slot = Some(top.char_at(i));
    }
    prefix
}
