//! Command implementations

pub mod add_words;
pub mod simple;
pub mod simulate;

pub use add_words::{read_input, run_add_words};
pub use simple::run_simple;
pub use simulate::{GameRecord, Guesser, SimulationResult, play_game, run_simulation};
