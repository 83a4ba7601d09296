//! Pure transitions over [`PuzzleState`]
//!
//! `reduce` never performs I/O. Anything the outside world must do as a
//! consequence (saving progress, arming or cancelling the feedback timer)
//! comes back as an [`Effect`] for the session layer to carry out.

use super::powerup::eliminate_letters;
use super::state::{Feedback, PuzzleState, Rejection, Status};
use crate::core::GuessRow;
use rand::Rng;

/// Player or timer input to the puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// Type a letter into the first free slot
    KeyPress(u8),
    /// Delete the rightmost player-typed letter
    Backspace,
    /// Delete the letter at a slot (click-to-remove)
    RemoveLetter(usize),
    /// Submit the full guess
    Submit,
    /// Use the letter-elimination power-up
    PowerUp,
    /// The rejection display interval for `episode` elapsed
    ClearFeedback { episode: u64 },
}

/// Side effects requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Save the bounds record for the state's date
    PersistBounds,
    /// Save the session progress record
    PersistSession,
    /// Clear the rejection of `episode` after the display interval
    ScheduleFeedbackClear { episode: u64 },
    /// Drop any pending feedback clear
    CancelFeedbackClear,
}

/// What a transition did, for presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Event had no effect on the state
    Ignored,
    /// Guess row, letters, or feedback changed
    Updated,
    /// Full guess refused without counting an attempt
    Rejected(Rejection),
    /// Accepted guess moved the top bound down to it
    NarrowedTop,
    /// Accepted guess moved the bottom bound up to it
    NarrowedBottom,
    /// Accepted guess was the secret
    Won,
    /// Accepted guess used up the last attempt
    Exhausted,
}

/// Result of one transition
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: PuzzleState,
    pub effects: Vec<Effect>,
    pub outcome: Outcome,
}

impl Transition {
    fn ignored(state: &PuzzleState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
            outcome: Outcome::Ignored,
        }
    }
}

/// Apply `event` to `state`, returning the next state
///
/// The input state is left untouched, so a caller only ever observes the
/// state before or after a whole transition.
pub fn reduce<R: Rng + ?Sized>(state: &PuzzleState, event: Event, rng: &mut R) -> Transition {
    if state.status.is_terminal() {
        return Transition::ignored(state);
    }

    let mut next = state.clone();
    let mut effects = Vec::new();

    let outcome = match event {
        Event::KeyPress(letter) => {
            let letter = letter.to_ascii_lowercase();
            if !letter.is_ascii_lowercase() || next.disabled.contains(letter) {
                return Transition::ignored(state);
            }
            edit(&mut next, &mut effects, |guess| guess.push(letter))
        }
        Event::Backspace => edit(&mut next, &mut effects, GuessRow::backspace),
        Event::RemoveLetter(index) => {
            edit(&mut next, &mut effects, |guess| guess.remove_at(index))
        }
        Event::Submit => submit_guess(&mut next, &mut effects),
        Event::PowerUp => {
            if next.powerup_used {
                return Transition::ignored(state);
            }
            let picked = eliminate_letters(&next.secret, next.disabled, rng);
            next.disabled = next.disabled.union(picked);
            next.powerup_used = true;
            effects.push(Effect::PersistSession);
            tracing::debug!(letters = %picked, "power-up disabled letters");
            Outcome::Updated
        }
        Event::ClearFeedback { episode } => {
            if next.feedback.is_some_and(|f| f.episode == episode) {
                reset_guess(&mut next);
                effects.push(Effect::PersistSession);
                Outcome::Updated
            } else {
                Outcome::Ignored
            }
        }
    };

    Transition {
        state: next,
        effects,
        outcome,
    }
}

/// Run a guess-row edit, first settling any rejection still on display
fn edit(
    state: &mut PuzzleState,
    effects: &mut Vec<Effect>,
    op: impl FnOnce(&mut GuessRow) -> bool,
) -> Outcome {
    let settled = settle_rejection(state, effects);
    let changed = op(&mut state.guess);
    if settled || changed {
        effects.push(Effect::PersistSession);
        Outcome::Updated
    } else {
        Outcome::Ignored
    }
}

/// Resolve a displayed rejection early, before its timer fires
fn settle_rejection(state: &mut PuzzleState, effects: &mut Vec<Effect>) -> bool {
    if state.feedback.is_none() {
        return false;
    }
    reset_guess(state);
    effects.push(Effect::CancelFeedbackClear);
    true
}

/// Empty the guess, re-apply auto-fill, and drop feedback
fn reset_guess(state: &mut PuzzleState) {
    state.guess.clear();
    state.apply_auto_fill();
    state.feedback = None;
}

fn reject(state: &mut PuzzleState, effects: &mut Vec<Effect>, rejection: Rejection) -> Outcome {
    state.episode += 1;
    state.feedback = Some(Feedback {
        rejection,
        episode: state.episode,
    });
    effects.push(Effect::ScheduleFeedbackClear {
        episode: state.episode,
    });
    tracing::debug!(%rejection, episode = state.episode, "guess rejected");
    Outcome::Rejected(rejection)
}

/// The central transition: validate, count, win or narrow
fn submit_guess(state: &mut PuzzleState, effects: &mut Vec<Effect>) -> Outcome {
    let Some(word) = state.guess.to_word() else {
        return Outcome::Ignored;
    };

    if !state.dictionary.contains(&word) {
        return reject(state, effects, Rejection::NotInDictionary);
    }
    // The range is open at both ends
    if word <= state.top {
        return reject(state, effects, Rejection::NotAfterTop);
    }
    if word >= state.bottom {
        return reject(state, effects, Rejection::NotBeforeBottom);
    }

    state.attempts += 1;
    if state.feedback.take().is_some() {
        effects.push(Effect::CancelFeedbackClear);
    }

    if word == state.secret {
        state.status = Status::Won;
        state.guess = GuessRow::revealed(&state.secret);
        effects.push(Effect::PersistSession);
        tracing::info!(attempts = state.attempts, "puzzle solved");
        return Outcome::Won;
    }

    let outcome = if word < state.secret {
        state.top = word;
        state.top_updated = true;
        Outcome::NarrowedTop
    } else {
        state.bottom = word;
        state.bottom_updated = true;
        Outcome::NarrowedBottom
    };
    effects.push(Effect::PersistBounds);

    if state.max_attempts.is_some_and(|max| state.attempts >= max) {
        state.status = Status::Exhausted;
        state.guess = GuessRow::revealed(&state.secret);
        effects.push(Effect::PersistSession);
        tracing::info!(attempts = state.attempts, "attempts exhausted");
        return Outcome::Exhausted;
    }

    state.guess.clear();
    state.apply_auto_fill();
    effects.push(Effect::PersistSession);
    tracing::debug!(
        top = %state.top,
        bottom = %state.bottom,
        attempts = state.attempts,
        "bounds narrowed"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Dictionary, Word};
    use crate::engine::{PuzzleSetup, Restored, initialize};
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::sync::Arc;

    fn w(text: &str) -> Word {
        Word::new(text).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn puzzle(secret: &str, top: &str, bottom: &str, words: &[&str]) -> PuzzleState {
        let setup = PuzzleSetup {
            date: date(),
            secret: w(secret),
            initial_bounds: Some((w(top), w(bottom))),
            dictionary: Arc::new(Dictionary::from_strs(words)),
            max_attempts: None,
        };
        initialize(setup, Restored::default(), &mut StdRng::seed_from_u64(0)).unwrap()
    }

    fn fruit() -> PuzzleState {
        puzzle(
            "peach",
            "apple",
            "table",
            &["apple", "mango", "peach", "table", "zebra", "lemon"],
        )
    }

    struct Driver {
        state: PuzzleState,
        rng: StdRng,
        effects: Vec<Effect>,
    }

    impl Driver {
        fn new(state: PuzzleState) -> Self {
            Self {
                state,
                rng: StdRng::seed_from_u64(99),
                effects: Vec::new(),
            }
        }

        fn send(&mut self, event: Event) -> Outcome {
            let t = reduce(&self.state, event, &mut self.rng);
            self.state = t.state;
            self.effects = t.effects;
            t.outcome
        }

        fn type_word(&mut self, word: &str) {
            for b in word.bytes() {
                self.send(Event::KeyPress(b));
            }
        }

        fn guess(&mut self, word: &str) -> Outcome {
            self.type_word(word);
            self.send(Event::Submit)
        }
    }

    #[test]
    fn narrowing_scenario() {
        let mut d = Driver::new(fruit());

        assert_eq!(d.guess("mango"), Outcome::NarrowedTop);
        assert_eq!(d.state.top_word(), "mango");
        assert_eq!(d.state.attempts(), 1);
        assert_eq!(d.state.guess().filled_count(), 0);
        assert!(d.effects.contains(&Effect::PersistBounds));

        // Clear the pending guess and try beyond the bottom bound
        assert_eq!(d.guess("zebra"), Outcome::Rejected(Rejection::NotBeforeBottom));
        assert_eq!(d.state.attempts(), 1);
        assert_eq!(
            d.state.feedback_message().as_deref(),
            Some("Word must come before the bottom word")
        );

        let episode = d.state.feedback().unwrap().episode;
        d.send(Event::ClearFeedback { episode });
        assert!(d.state.feedback().is_none());

        assert_eq!(d.guess("peach"), Outcome::Won);
        assert_eq!(d.state.attempts(), 2);
        assert_eq!(d.state.status(), Status::Won);
        assert_eq!(d.state.guess().to_word().unwrap(), "peach");
        assert_eq!(d.state.revealed_secret(), Some(w("peach")));
    }

    #[test]
    fn guess_above_secret_moves_bottom() {
        let mut d = Driver::new(fruit());
        assert_eq!(d.guess("pearl"), Outcome::Rejected(Rejection::NotInDictionary));

        let mut d = Driver::new(fruit());
        d.state.dictionary = Arc::new(Dictionary::from_strs(&["apple", "peach", "pearl", "table"]));
        assert_eq!(d.guess("pearl"), Outcome::NarrowedBottom);
        assert_eq!(d.state.bottom_word(), "pearl");
        assert!(d.state.bounds_snapshot().bottom_word_updated);
        assert!(!d.state.bounds_snapshot().top_word_updated);
    }

    #[test]
    fn dictionary_rejection_does_not_count() {
        let mut d = Driver::new(fruit());
        assert_eq!(d.guess("xxxxx"), Outcome::Rejected(Rejection::NotInDictionary));
        assert_eq!(d.state.attempts(), 0);
        assert_eq!(
            d.state.feedback_message().as_deref(),
            Some("Word not found in dictionary")
        );
        assert!(matches!(
            d.effects.as_slice(),
            [Effect::ScheduleFeedbackClear { .. }]
        ));
    }

    #[test]
    fn bounds_themselves_are_rejected() {
        let mut d = Driver::new(fruit());
        assert_eq!(d.guess("apple"), Outcome::Rejected(Rejection::NotAfterTop));
        d.send(Event::ClearFeedback {
            episode: d.state.feedback().unwrap().episode,
        });
        assert_eq!(d.guess("table"), Outcome::Rejected(Rejection::NotBeforeBottom));
        assert_eq!(d.state.attempts(), 0);
    }

    #[test]
    fn bound_equal_to_secret_is_still_rejected() {
        // A bad upstream state where the top bound is the secret itself
        let mut state = fruit();
        state.top = w("peach");
        let mut d = Driver::new(state);
        assert_eq!(d.guess("peach"), Outcome::Rejected(Rejection::NotAfterTop));
        assert_eq!(d.state.status(), Status::InProgress);
    }

    #[test]
    fn stale_clear_is_ignored() {
        let mut d = Driver::new(fruit());
        d.guess("xxxxx");
        let first = d.state.feedback().unwrap().episode;

        // Resubmitting starts a new rejection episode
        d.send(Event::Submit);
        let second = d.state.feedback().unwrap().episode;
        assert!(second > first);

        assert_eq!(d.send(Event::ClearFeedback { episode: first }), Outcome::Ignored);
        assert!(d.state.feedback().is_some());
        assert_eq!(d.state.guess().filled_count(), 5);

        d.send(Event::ClearFeedback { episode: second });
        assert!(d.state.feedback().is_none());
        assert_eq!(d.state.guess().filled_count(), 0);
    }

    #[test]
    fn typing_during_rejection_settles_it() {
        let mut d = Driver::new(fruit());
        d.guess("xxxxx");
        let episode = d.state.feedback().unwrap().episode;

        d.send(Event::KeyPress(b'm'));
        assert!(d.state.feedback().is_none());
        assert_eq!(d.state.guess().slots()[0], Some(b'm'));
        assert_eq!(d.state.guess().filled_count(), 1);
        assert!(d.effects.contains(&Effect::CancelFeedbackClear));

        // The old timer firing later must not wipe the new letter
        d.send(Event::ClearFeedback { episode });
        assert_eq!(d.state.guess().filled_count(), 1);
    }

    #[test]
    fn submit_requires_full_guess() {
        let mut d = Driver::new(fruit());
        d.type_word("man");
        assert_eq!(d.send(Event::Submit), Outcome::Ignored);
        assert_eq!(d.state.attempts(), 0);
    }

    #[test]
    fn keypress_normalizes_and_filters() {
        let mut d = Driver::new(fruit());
        assert_eq!(d.send(Event::KeyPress(b'M')), Outcome::Updated);
        assert_eq!(d.state.guess().slots()[0], Some(b'm'));
        assert_eq!(d.send(Event::KeyPress(b'7')), Outcome::Ignored);
    }

    #[test]
    fn disabled_letters_cannot_be_typed() {
        let mut d = Driver::new(fruit());
        assert_eq!(d.send(Event::PowerUp), Outcome::Updated);
        let disabled = d.state.disabled_letters();
        assert_eq!(disabled.len(), 3);

        let letter = disabled.iter().next().unwrap();
        assert_eq!(d.send(Event::KeyPress(letter)), Outcome::Ignored);
        assert_eq!(d.state.guess().filled_count(), 0);
    }

    #[test]
    fn powerup_is_one_shot() {
        let mut d = Driver::new(fruit());
        d.send(Event::PowerUp);
        assert!(!d.state.powerup_available());
        let before = d.state.disabled_letters();
        assert_eq!(d.send(Event::PowerUp), Outcome::Ignored);
        assert_eq!(d.state.disabled_letters(), before);
    }

    #[test]
    fn auto_fill_after_narrowing() {
        let mut d = Driver::new(puzzle(
            "peach",
            "apple",
            "table",
            &["apple", "peace", "peach", "pearl", "table"],
        ));
        d.guess("peace");
        d.guess("pearl");
        assert_eq!(d.state.top_word(), "peace");
        assert_eq!(d.state.bottom_word(), "pearl");
        assert_eq!(
            *d.state.guess().slots(),
            [Some(b'p'), Some(b'e'), Some(b'a'), None, None]
        );

        // Player can only type into slots 3 and 4
        d.send(Event::KeyPress(b'c'));
        d.send(Event::KeyPress(b'h'));
        assert_eq!(d.send(Event::KeyPress(b'x')), Outcome::Ignored);
        d.send(Event::Backspace);
        d.send(Event::Backspace);
        assert_eq!(d.send(Event::Backspace), Outcome::Ignored);
        assert_eq!(d.send(Event::RemoveLetter(0)), Outcome::Ignored);
        assert_eq!(d.state.guess().filled_count(), 3);

        d.type_word("ch");
        assert_eq!(d.send(Event::Submit), Outcome::Won);
        assert_eq!(d.state.attempts(), 3);
    }

    #[test]
    fn terminal_state_ignores_input() {
        let mut d = Driver::new(fruit());
        d.guess("peach");
        let snapshot = d.state.clone();
        for event in [
            Event::KeyPress(b'a'),
            Event::Backspace,
            Event::RemoveLetter(0),
            Event::Submit,
            Event::PowerUp,
        ] {
            assert_eq!(d.send(event), Outcome::Ignored);
        }
        assert_eq!(d.state.attempts(), snapshot.attempts());
        assert_eq!(d.state.guess(), snapshot.guess());
    }

    #[test]
    fn attempt_limit_exhausts() {
        let mut state = fruit();
        state.max_attempts = Some(1);
        let mut d = Driver::new(state);

        assert_eq!(d.guess("mango"), Outcome::Exhausted);
        assert_eq!(d.state.status(), Status::Exhausted);
        assert_eq!(d.state.revealed_secret(), Some(w("peach")));
        assert!(d.effects.contains(&Effect::PersistSession));
    }

    #[test]
    fn winning_on_last_attempt_is_a_win() {
        let mut state = fruit();
        state.max_attempts = Some(1);
        let mut d = Driver::new(state);
        assert_eq!(d.guess("peach"), Outcome::Won);
    }

    #[test]
    fn invariant_holds_over_random_play() {
        let words = crate::wordlists::FALLBACK_WORDS;
        let dictionary = Arc::new(Dictionary::from_strs(words));
        let mut rng = StdRng::seed_from_u64(2024);

        for round in 0..20 {
            let secret = dictionary.words()[50 + round * 13];
            let setup = PuzzleSetup {
                date: date(),
                secret,
                initial_bounds: None,
                dictionary: Arc::clone(&dictionary),
                max_attempts: None,
            };
            let mut state = initialize(setup, Restored::default(), &mut rng).unwrap();
            let mut last_attempts = 0;

            for _ in 0..40 {
                let pick = dictionary.words()[rng.random_range(0..dictionary.len())];
                for &b in pick.chars() {
                    state = reduce(&state, Event::KeyPress(b), &mut rng).state;
                }
                let t = reduce(&state, Event::Submit, &mut rng);
                state = t.state;
                if let Some(f) = state.feedback() {
                    state = reduce(&state, Event::ClearFeedback { episode: f.episode }, &mut rng)
                        .state;
                }

                assert!(state.attempts() >= last_attempts);
                assert!(state.attempts() - last_attempts <= 1);
                last_attempts = state.attempts();

                if state.status() == Status::InProgress {
                    assert!(state.top < state.secret && state.secret < state.bottom);
                } else {
                    break;
                }
            }
        }
    }
}
