//! Simulation command
//!
//! Plays the puzzle automatically against many secrets to show how the
//! randomly chosen starting bounds spread the difficulty.

use crate::core::{Dictionary, Word};
use crate::engine::{Event, Outcome, PuzzleSetup, PuzzleState, Restored, Status, initialize, reduce};
use chrono::NaiveDate;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How the simulated player picks its next guess
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guesser {
    /// Middle word of the remaining range
    Bisect,
    /// Any word of the remaining range
    Random,
}

impl Guesser {
    /// Parse a guesser name, defaulting to bisection
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "random" => Self::Random,
            _ => Self::Bisect,
        }
    }

    fn pick<R: Rng + ?Sized>(self, range: &[Word], rng: &mut R) -> Option<Word> {
        match self {
            Self::Bisect => range.get(range.len() / 2).copied(),
            Self::Random => range.choose(rng).copied(),
        }
    }
}

/// One simulated game
#[derive(Debug, Clone, Copy)]
pub struct GameRecord {
    pub secret: Word,
    pub attempts: u32,
    /// Dictionary words strictly between the starting bounds
    pub initial_range: usize,
    pub won: bool,
}

/// Aggregate statistics over all simulated games
#[derive(Debug)]
pub struct SimulationResult {
    pub guesser: Guesser,
    pub games: usize,
    pub won: usize,
    pub total_attempts: u64,
    pub average_attempts: f64,
    pub min_attempts: u32,
    pub max_attempts: u32,
    pub average_initial_range: f64,
    pub distribution: BTreeMap<u32, usize>,
    pub hardest: Vec<(Word, u32)>,
    pub duration: Duration,
    pub games_per_second: f64,
}

/// Play one game to the end
///
/// Gives up after as many accepted guesses as there are dictionary words,
/// which a correct engine never reaches.
pub fn play_game<R: Rng + ?Sized>(
    dictionary: &Arc<Dictionary>,
    secret: Word,
    guesser: Guesser,
    rng: &mut R,
) -> Option<GameRecord> {
    let setup = PuzzleSetup {
        date: NaiveDate::default(),
        secret,
        initial_bounds: None,
        dictionary: Arc::clone(dictionary),
        max_attempts: None,
    };
    let mut state = initialize(setup, Restored::default(), rng).ok()?;
    let initial_range = dictionary
        .between(&state.top_word(), &state.bottom_word())
        .len();

    let limit = u32::try_from(dictionary.len()).unwrap_or(u32::MAX);
    while state.status() == Status::InProgress && state.attempts() < limit {
        let guess = guesser.pick(
            dictionary.between(&state.top_word(), &state.bottom_word()),
            rng,
        )?;
        let (next, outcome) = submit(&state, guess, rng);
        state = next;
        if matches!(outcome, Outcome::Rejected(_) | Outcome::Ignored) {
            tracing::warn!(%secret, %guess, ?outcome, "Simulated guess was not accepted");
            break;
        }
    }

    Some(GameRecord {
        secret,
        attempts: state.attempts(),
        initial_range,
        won: state.status() == Status::Won,
    })
}

/// Type `guess` into the free slots and submit it
fn submit<R: Rng + ?Sized>(
    state: &PuzzleState,
    guess: Word,
    rng: &mut R,
) -> (PuzzleState, Outcome) {
    let mut current = state.clone();
    for (i, &letter) in guess.chars().iter().enumerate() {
        if !current.guess().is_auto_filled(i) {
            current = reduce(&current, Event::KeyPress(letter), rng).state;
        }
    }
    let transition = reduce(&current, Event::Submit, rng);
    (transition.state, transition.outcome)
}

/// Simulate one game per secret, in parallel
///
/// Each game gets its own generator derived from `seed`, so results are
/// reproducible regardless of scheduling.
#[allow(clippy::cast_precision_loss)]
pub fn run_simulation(
    dictionary: &Arc<Dictionary>,
    secrets: &[Word],
    guesser: Guesser,
    seed: u64,
    show_progress: bool,
) -> SimulationResult {
    let start = Instant::now();

    let pb = if show_progress {
        let pb = ProgressBar::new(secrets.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}")
        {
            pb.set_style(style.progress_chars("█▓▒░"));
        }
        pb
    } else {
        ProgressBar::hidden()
    };

    let records: Vec<GameRecord> = secrets
        .par_iter()
        .enumerate()
        .filter_map(|(i, &secret)| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            let record = play_game(dictionary, secret, guesser, &mut rng);
            pb.inc(1);
            record
        })
        .collect();

    pb.finish_with_message("Complete!");
    let duration = start.elapsed();

    let games = records.len();
    let won = records.iter().filter(|r| r.won).count();
    let total_attempts: u64 = records.iter().map(|r| u64::from(r.attempts)).sum();
    let mut distribution = BTreeMap::new();
    for record in &records {
        *distribution.entry(record.attempts).or_insert(0) += 1;
    }

    let mut hardest: Vec<(Word, u32)> = records.iter().map(|r| (r.secret, r.attempts)).collect();
    hardest.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    hardest.truncate(5);

    let per_game = |total: f64| if games > 0 { total / games as f64 } else { 0.0 };

    SimulationResult {
        guesser,
        games,
        won,
        total_attempts,
        average_attempts: per_game(total_attempts as f64),
        min_attempts: records.iter().map(|r| r.attempts).min().unwrap_or(0),
        max_attempts: records.iter().map(|r| r.attempts).max().unwrap_or(0),
        average_initial_range: per_game(records.iter().map(|r| r.initial_range as f64).sum()),
        distribution,
        hardest,
        duration,
        games_per_second: games as f64 / duration.as_secs_f64().max(f64::EPSILON),
    }
}
