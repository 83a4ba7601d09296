//! Built-in word lists
//!
//! The fallback list is used whenever the word store cannot supply a
//! dictionary, and as the last resort for choosing a secret.

mod embedded;
pub mod loader;

pub use embedded::{FALLBACK_WORDS, FALLBACK_WORDS_COUNT};
