//! Frantic Five
//!
//! A daily word-deduction puzzle: the secret 5-letter word lies
//! alphabetically between a top word and a bottom word, and every valid
//! guess replaces the bound on its side of the secret.
//!
//! # Quick Start
//!
//! ```rust
//! use frantic_five::core::{Dictionary, Word};
//! use frantic_five::engine::{Event, Outcome, PuzzleSetup, Restored, initialize, reduce};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use std::sync::Arc;
//!
//! let dictionary = Dictionary::from_strs(&["apple", "mango", "peach", "table", "zebra"]);
//! let setup = PuzzleSetup {
//!     date: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     secret: Word::new("peach").unwrap(),
//!     initial_bounds: Some((Word::new("apple").unwrap(), Word::new("zebra").unwrap())),
//!     dictionary: Arc::new(dictionary),
//!     max_attempts: None,
//! };
//! let mut rng = StdRng::seed_from_u64(1);
//! let mut state = initialize(setup, Restored::default(), &mut rng).unwrap();
//!
//! for letter in *b"mango" {
//!     state = reduce(&state, Event::KeyPress(letter), &mut rng).state;
//! }
//! let transition = reduce(&state, Event::Submit, &mut rng);
//! assert_eq!(transition.outcome, Outcome::NarrowedTop);
//! assert_eq!(transition.state.top_word(), "mango");
//! ```

// Core domain types
pub mod core;

// Puzzle state machine
pub mod engine;

// Word store access and the dictionary fallback chain
pub mod oracle;

// Persisted progress
pub mod storage;

// Loading, effects, and timers around the engine
pub mod session;

// Word lists
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;

// Command line and environment options
pub mod config;

// Tracing setup
pub mod logging;
