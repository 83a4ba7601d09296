//! Puzzle session
//!
//! The side-effecting wrapper around the engine. A session loads the day's
//! puzzle through the oracle fallback chain, reconciles it with stored
//! progress, feeds events to [`reduce`], and carries out the resulting
//! effects: saving records and running the feedback timer.
//!
//! Loads are tagged with a [`LoadTicket`]. Only the most recently started
//! load may install its result, so a slow stale load never overwrites a
//! newer one.

mod timer;

pub use timer::{DEFAULT_FEEDBACK_DELAY, FeedbackTimer};

use crate::core::Word;
use crate::engine::{
    Effect, EngineError, Event, Outcome, PuzzleSetup, PuzzleState, Restored, initialize, reduce,
};
use crate::oracle::{DictionaryOracle, StoreError, WordStore};
use crate::storage::{StorageProvider, records};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Why a session could not produce a playable puzzle
#[derive(Debug, Error)]
pub enum SessionError {
    /// Daily word, store random word, and built-in list all failed
    #[error("Unable to load today's word: {0}")]
    NoSecret(#[source] StoreError),
    #[error("Unable to start today's puzzle: {0}")]
    Engine(#[from] EngineError),
}

/// Tunables for a session
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// How long a rejection message stays up
    pub feedback_delay: Duration,
    /// Accepted guesses allowed before the game is exhausted
    pub max_attempts: Option<u32>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            feedback_delay: DEFAULT_FEEDBACK_DELAY,
            max_attempts: None,
        }
    }
}

/// Identifies one load attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

#[derive(Debug)]
enum Phase {
    Loading,
    Failed(String),
    Ready(PuzzleState),
}

/// Everything a front end renders
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    pub is_loading: bool,
    pub error: Option<&'a str>,
    pub state: Option<&'a PuzzleState>,
}

pub struct Session<S, P> {
    oracle: DictionaryOracle<S>,
    storage: P,
    config: SessionConfig,
    rng: StdRng,
    phase: Phase,
    issued: u64,
    pending: Option<LoadTicket>,
    timer: Option<FeedbackTimer>,
}

impl<S: WordStore, P: StorageProvider> Session<S, P> {
    /// Create a session in the loading phase
    ///
    /// Nothing is fetched until [`initialize`](Self::initialize) or
    /// [`begin_load`](Self::begin_load) is called.
    #[must_use]
    pub fn new(oracle: DictionaryOracle<S>, storage: P, config: SessionConfig) -> Self {
        Self {
            oracle,
            storage,
            config,
            rng: StdRng::from_rng(&mut rand::rng()),
            phase: Phase::Loading,
            issued: 0,
            pending: None,
            timer: None,
        }
    }

    /// Make bound derivation and power-ups reproducible
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    #[must_use]
    pub fn view(&self) -> SessionView<'_> {
        match &self.phase {
            Phase::Loading => SessionView {
                is_loading: true,
                error: None,
                state: None,
            },
            Phase::Failed(message) => SessionView {
                is_loading: false,
                error: Some(message.as_str()),
                state: None,
            },
            Phase::Ready(state) => SessionView {
                is_loading: false,
                error: None,
                state: Some(state),
            },
        }
    }

    #[must_use]
    pub fn state(&self) -> Option<&PuzzleState> {
        match &self.phase {
            Phase::Ready(state) => Some(state),
            _ => None,
        }
    }

    #[must_use]
    pub const fn oracle(&self) -> &DictionaryOracle<S> {
        &self.oracle
    }

    pub const fn oracle_mut(&mut self) -> &mut DictionaryOracle<S> {
        &mut self.oracle
    }

    #[must_use]
    pub const fn storage(&self) -> &P {
        &self.storage
    }

    #[must_use]
    pub const fn config(&self) -> SessionConfig {
        self.config
    }

    /// Load (or reload) today's puzzle
    pub fn initialize(&mut self) {
        let ticket = self.begin_load();
        let result = self.fetch_setup();
        self.finish_load(ticket, result);
    }

    /// Clear an error and try loading again
    pub fn retry(&mut self) {
        tracing::info!("Retrying puzzle load");
        self.initialize();
    }

    /// Start a load, superseding any load already in flight
    ///
    /// The session shows as loading until the returned ticket is finished.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        let ticket = LoadTicket(self.issued);
        self.pending = Some(ticket);
        self.timer = None;
        self.phase = Phase::Loading;
        tracing::debug!(ticket = ticket.0, "Load started");
        ticket
    }

    /// Gather the day's secret, bounds, and dictionary from the oracle
    ///
    /// The secret comes from the daily assignment, else the store's random
    /// word, else a random built-in word.
    ///
    /// # Errors
    /// `SessionError::NoSecret` when every source fails.
    pub fn fetch_setup(&mut self) -> Result<PuzzleSetup, SessionError> {
        let date = self.oracle.current_date();

        let secret = match self.oracle.fetch_daily_secret(date) {
            Ok(word) => word,
            Err(daily) => {
                tracing::warn!(%date, "Daily word unavailable: {}", daily);
                self.secret_fallback(daily)?
            }
        };

        let initial_bounds = self.oracle.fetch_initial_bounds(date).unwrap_or_else(|e| {
            tracing::warn!(%date, "Initial bounds unavailable: {}", e);
            None
        });

        let mut dictionary = self.oracle.fetch_dictionary();
        dictionary.insert(secret);

        Ok(PuzzleSetup {
            date,
            secret,
            initial_bounds,
            dictionary: Arc::new(dictionary),
            max_attempts: self.config.max_attempts,
        })
    }

    fn secret_fallback(&mut self, daily: StoreError) -> Result<Word, SessionError> {
        match self.oracle.fetch_random_word() {
            Ok(word) => return Ok(word),
            Err(e) => tracing::warn!("Store random word unavailable: {}", e),
        }
        match self.oracle.fallback_word(&mut self.rng) {
            Some(word) => {
                tracing::warn!("Using a built-in word as today's secret");
                Ok(word)
            }
            None => Err(SessionError::NoSecret(daily)),
        }
    }

    /// Install the result of a load
    ///
    /// Returns `false`, changing nothing, if `ticket` is not the latest load.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<PuzzleSetup, SessionError>,
    ) -> bool {
        if self.pending != Some(ticket) {
            tracing::debug!(ticket = ticket.0, "Ignoring stale load");
            return false;
        }
        self.pending = None;

        let outcome = result.and_then(|setup| self.reconcile(setup));
        self.phase = match outcome {
            Ok(state) => {
                tracing::info!(
                    date = %state.date(),
                    status = ?state.status(),
                    attempts = state.attempts(),
                    "Puzzle ready"
                );
                Phase::Ready(state)
            }
            Err(e) => {
                tracing::warn!("Puzzle load failed: {}", e);
                Phase::Failed(e.to_string())
            }
        };
        true
    }

    fn reconcile(&mut self, setup: PuzzleSetup) -> Result<PuzzleState, SessionError> {
        let date = setup.date;
        let session = records::load_session(&self.storage);
        if let Some(stale) = session.as_ref().filter(|s| s.date != date) {
            tracing::info!(previous = %stale.date, today = %date, "New day, discarding old progress");
            records::forget_date(&self.storage, stale.date);
        }

        let restored = Restored {
            bounds: records::load_bounds(&self.storage, date),
            session,
        };
        let state = initialize(setup, restored, &mut self.rng)?;

        // Pin the bounds so a reload before the first guess sees the same ones
        records::save_bounds(&self.storage, &state);
        records::save_session(&self.storage, &state);
        Ok(state)
    }

    /// Feed one event to the puzzle
    ///
    /// Ignored while loading or failed.
    pub fn dispatch(&mut self, event: Event, now: Instant) -> Outcome {
        let Phase::Ready(state) = &self.phase else {
            return Outcome::Ignored;
        };
        let transition = reduce(state, event, &mut self.rng);
        let next = transition.state;
        for effect in &transition.effects {
            self.apply(*effect, &next, now);
        }
        self.phase = Phase::Ready(next);
        transition.outcome
    }

    fn apply(&mut self, effect: Effect, state: &PuzzleState, now: Instant) {
        match effect {
            Effect::PersistBounds => records::save_bounds(&self.storage, state),
            Effect::PersistSession => records::save_session(&self.storage, state),
            Effect::ScheduleFeedbackClear { episode } => {
                self.timer = Some(FeedbackTimer::schedule(
                    episode,
                    now,
                    self.config.feedback_delay,
                ));
            }
            Effect::CancelFeedbackClear => self.timer = None,
        }
    }

    /// The pending feedback clear, if any
    #[must_use]
    pub const fn pending_timer(&self) -> Option<FeedbackTimer> {
        self.timer
    }

    /// Fire the feedback timer if it is due
    ///
    /// Returns whether the state changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.timer {
            Some(timer) if timer.is_due(now) => {
                self.timer = None;
                let outcome = self.dispatch(
                    Event::ClearFeedback {
                        episode: timer.episode(),
                    },
                    now,
                );
                outcome != Outcome::Ignored
            }
            _ => false,
        }
    }

    /// Whether the loaded puzzle belongs to an earlier day
    #[must_use]
    pub fn is_stale(&self) -> bool {
        self.state()
            .is_some_and(|state| state.date() != self.oracle.current_date())
    }

    /// Reload if the authoritative date has moved on
    ///
    /// Returns whether a reload happened.
    pub fn refresh_if_stale(&mut self) -> bool {
        if !self.is_stale() {
            return false;
        }
        tracing::info!("Day rolled over, loading the new puzzle");
        self.initialize();
        true
    }
}
