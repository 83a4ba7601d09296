//! Puzzle engine
//!
//! Owns the puzzle rules: bounding the secret word, validating guesses,
//! narrowing the range, auto-filling the shared prefix, the elimination
//! power-up, and reconciliation with persisted progress.
//!
//! State changes only through [`initialize`] and [`reduce`]; both are free
//! of I/O so any front end can drive them.

mod autofill;
mod bounds;
mod init;
mod powerup;
mod reducer;
mod state;

pub use autofill::compute_auto_fill_prefix;
pub use bounds::{brackets, derive_bounds};
pub use init::{EngineError, PuzzleSetup, Restored, initialize};
pub use powerup::{LETTERS_PER_POWERUP, eliminate_letters};
pub use reducer::{Effect, Event, Outcome, Transition, reduce};
pub use state::{BoundsSnapshot, Feedback, PuzzleState, Rejection, SessionSnapshot, Status};
