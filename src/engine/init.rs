//! Puzzle initialization and reconciliation with persisted progress

use super::bounds::{brackets, derive_bounds};
use super::state::{BoundsSnapshot, PuzzleState, SessionSnapshot, Status};
use crate::core::{AutoFill, Dictionary, GuessRow, LetterSet, Word};
use chrono::NaiveDate;
use rand::Rng;
use std::sync::Arc;
use thiserror::Error;

/// Everything the oracle supplies for one day
#[derive(Debug, Clone)]
pub struct PuzzleSetup {
    pub date: NaiveDate,
    pub secret: Word,
    /// Bounds pre-computed by the word store, if any
    pub initial_bounds: Option<(Word, Word)>,
    pub dictionary: Arc<Dictionary>,
    pub max_attempts: Option<u32>,
}

/// Persisted records found in storage
#[derive(Debug, Clone, Copy, Default)]
pub struct Restored {
    /// Bounds record stored under the setup's date
    pub bounds: Option<BoundsSnapshot>,
    /// Most recent session record, for any date
    pub session: Option<SessionSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// No 5-letter word can sit strictly before `aaaaa` or after `zzzzz`
    #[error("secret word \"{0}\" cannot be bounded")]
    UnboundableSecret(Word),
}

/// Build the day's state, restoring progress recorded for the same date
///
/// - Persisted bounds are used when they still bracket the secret.
/// - Otherwise store-supplied bounds are used when they bracket it.
/// - Otherwise bounds are derived at random from the dictionary.
/// - Session progress is restored only when its date matches; a record
///   from another day is discarded and the game starts fresh.
///
/// Auto-fill is applied once the bounds are set.
///
/// # Errors
/// Returns `EngineError::UnboundableSecret` for the sentinel words
/// `aaaaa` and `zzzzz`.
pub fn initialize<R: Rng + ?Sized>(
    setup: PuzzleSetup,
    restored: Restored,
    rng: &mut R,
) -> Result<PuzzleState, EngineError> {
    let secret = setup.secret;
    if secret == Word::FLOOR || secret == Word::CEILING {
        return Err(EngineError::UnboundableSecret(secret));
    }

    let bounds_discarded = restored
        .bounds
        .is_some_and(|saved| !brackets(&saved.top_word, &secret, &saved.bottom_word));

    let (top, bottom, top_updated, bottom_updated) = match restored.bounds {
        Some(saved) if brackets(&saved.top_word, &secret, &saved.bottom_word) => {
            tracing::debug!(narrowed = saved.narrowed(), "restoring persisted bounds");
            (
                saved.top_word,
                saved.bottom_word,
                saved.top_word_updated,
                saved.bottom_word_updated,
            )
        }
        saved => {
            if saved.is_some() {
                tracing::warn!("persisted bounds do not bracket the secret; discarding");
            }
            let (top, bottom) = fresh_bounds(&setup, rng);
            (top, bottom, false, false)
        }
    };

    let mut state = PuzzleState {
        date: setup.date,
        secret,
        top,
        bottom,
        top_updated,
        bottom_updated,
        guess: GuessRow::new(),
        attempts: 0,
        status: Status::InProgress,
        disabled: LetterSet::new(),
        powerup_used: false,
        feedback: None,
        episode: 0,
        max_attempts: setup.max_attempts,
        dictionary: setup.dictionary,
    };

    // Progress recorded against bounds that no longer fit belongs to another secret
    match restored.session {
        Some(session) if session.date == setup.date && bounds_discarded => {
            tracing::warn!(
                date = %session.date,
                "session progress does not match the secret; discarding"
            );
        }
        Some(session) if session.date == setup.date => restore_progress(&mut state, &session),
        Some(session) => {
            tracing::debug!(stale = %session.date, today = %setup.date, "discarding stale session");
        }
        None => {}
    }

    if state.status.is_terminal() {
        state.guess = GuessRow::revealed(&state.secret);
    } else {
        state.apply_auto_fill();
    }

    Ok(state)
}

fn fresh_bounds<R: Rng + ?Sized>(setup: &PuzzleSetup, rng: &mut R) -> (Word, Word) {
    match setup.initial_bounds {
        Some((top, bottom)) if brackets(&top, &setup.secret, &bottom) => (top, bottom),
        supplied => {
            if supplied.is_some() {
                tracing::warn!("store bounds do not bracket the secret; deriving locally");
            }
            derive_bounds(&setup.dictionary, &setup.secret, rng)
        }
    }
}

fn restore_progress(state: &mut PuzzleState, session: &SessionSnapshot) {
    state.attempts = session.attempts;
    state.status = session.status;
    state.disabled = session.disabled_letters;
    state.powerup_used = session.powerup_used;
    if !session.status.is_terminal() {
        state.guess = reconcile_guess(&session.guess_row(), &state.auto_fill_prefix());
    }
    tracing::debug!(
        attempts = session.attempts,
        status = ?session.status,
        "restored session progress"
    );
}

/// Keep the saved letters but only trust auto-fill marks the bounds still imply
fn reconcile_guess(saved: &GuessRow, prefix: &AutoFill) -> GuessRow {
    let slots = *saved.slots();
    let mut mask = *saved.auto_filled();
    for (i, flag) in mask.iter_mut().enumerate() {
        if *flag && slots[i] != prefix[i] {
            tracing::debug!(slot = i, "dropping stale auto-fill mark");
            *flag = false;
        }
    }
    GuessRow::from_parts(slots, mask)
}
