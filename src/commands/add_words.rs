//! Admin word entry
//!
//! Adds words to the local word store from arguments or standard input.

use crate::oracle::{AddWordsReport, Clock, LocalWordStore, StoreError};
use std::io::{self, Read};

/// Collect the raw admin input
///
/// Arguments are joined with spaces. With no arguments, or a single `-`,
/// standard input is read instead.
///
/// # Errors
///
/// Returns an I/O error if standard input cannot be read.
pub fn read_input(args: &[String], stdin: impl Read) -> io::Result<String> {
    match args {
        [] => read_all(stdin),
        [dash] if dash == "-" => read_all(stdin),
        words => Ok(words.join(" ")),
    }
}

fn read_all(mut reader: impl Read) -> io::Result<String> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}

/// Add the words in `input` to `store`
///
/// # Errors
///
/// `StoreError::NoValidWords` if nothing in `input` is a 5-letter word, or
/// any store failure.
pub fn run_add_words<C: Clock>(
    store: &mut LocalWordStore<C>,
    input: &str,
) -> Result<AddWordsReport, StoreError> {
    let report = store.add_words(input)?;
    tracing::info!(
        added = report.added,
        duplicates = report.duplicates,
        total = store.len(),
        "Words added"
    );
    Ok(report)
}
