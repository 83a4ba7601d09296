//! Simple interactive CLI mode
//!
//! Plays today's puzzle line by line without the TUI.

use crate::core::{LetterSet, Word};
use crate::engine::{Event, Outcome, PuzzleState, Rejection};
use crate::oracle::WordStore;
use crate::output::formatters::{COME_BACK_MESSAGE, tiles};
use crate::output::{print_board, print_result};
use crate::session::Session;
use crate::storage::StorageProvider;
use anyhow::Result;
use colored::Colorize;
use std::io::{self, Write};
use std::time::Instant;

/// Run the line-mode game loop
///
/// # Errors
///
/// Returns an error if reading from stdin or writing to stdout fails.
pub fn run_simple<S: WordStore, P: StorageProvider>(session: &mut Session<S, P>) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                 Frantic Five - Line Mode                     ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("The secret word sits alphabetically between the top and bottom words.");
    println!("Each valid guess replaces the bound on its side of the secret.\n");
    println!("Commands: 'power' to disable three letters, 'quit' to exit\n");

    session.initialize();

    loop {
        session.refresh_if_stale();

        if let Some(error) = session.view().error.map(str::to_string) {
            println!("{} {error}", "❌".red());
            match get_user_input("Retry? (yes/no)")?.to_lowercase().as_str() {
                "yes" | "y" => {
                    session.retry();
                    continue;
                }
                _ => return Ok(()),
            }
        }

        let Some(state) = session.state().cloned() else {
            session.initialize();
            continue;
        };

        if state.status().is_terminal() {
            print_result(&state);
            return Ok(());
        }

        print_board(&state);

        let input = get_user_input("Guess")?.to_lowercase();
        match input.as_str() {
            "" => {}
            "quit" | "q" | "exit" => {
                println!("\n👋 Progress saved. {COME_BACK_MESSAGE}\n");
                return Ok(());
            }
            "power" | "p" => {
                let outcome = session.dispatch(Event::PowerUp, Instant::now());
                if outcome == Outcome::Ignored {
                    println!("Power-up already used today.");
                } else if let Some(state) = session.state() {
                    println!(
                        "✨ Disabled letters: {}",
                        state.disabled_letters().to_string().to_uppercase()
                    );
                }
            }
            text => play_word(session, text),
        }
    }
}

fn play_word<S: WordStore, P: StorageProvider>(session: &mut Session<S, P>, text: &str) {
    let Ok(word) = Word::new(text) else {
        println!("{} Guesses must be exactly 5 letters", "❌".red());
        return;
    };
    let Some(state) = session.state() else {
        return;
    };
    if let Some(rejection) = prefix_rejection(state, &word) {
        println!("{} {rejection}", "❌".red());
        return;
    }
    let eliminated = disabled_in(state, &word);
    if !eliminated.is_empty() {
        let letters: Vec<String> = eliminated
            .iter()
            .map(|l| char::from(l.to_ascii_uppercase()).to_string())
            .collect();
        println!(
            "{} Letters eliminated by the power-up: {}",
            "❌".red(),
            letters.join(", ")
        );
        return;
    }

    let now = Instant::now();
    while session
        .state()
        .is_some_and(|s| s.guess().player_filled_count() > 0 || s.feedback().is_some())
    {
        if session.dispatch(Event::Backspace, now) == Outcome::Ignored {
            break;
        }
    }
    let auto_filled = session
        .state()
        .map(|s| *s.guess().auto_filled())
        .unwrap_or_default();
    for (i, &letter) in word.chars().iter().enumerate() {
        if !auto_filled[i] {
            session.dispatch(Event::KeyPress(letter), now);
        }
    }

    let outcome = session.dispatch(Event::Submit, now);
    if let Some(line) = session.state().and_then(|s| describe(outcome, &word, s)) {
        println!("{line}");
    }
}

/// Rejection for a typed word that disagrees with the auto-filled prefix
///
/// Such a word cannot lie between the bounds, so it is refused the same way
/// the engine would refuse it.
#[must_use]
pub fn prefix_rejection(state: &PuzzleState, word: &Word) -> Option<Rejection> {
    let guess = state.guess();
    let conflicts = (0..word.chars().len()).any(|i| {
        guess.is_auto_filled(i) && guess.slots()[i] != Some(word.char_at(i))
    });
    if !conflicts {
        None
    } else if !state.dictionary().contains(word) {
        Some(Rejection::NotInDictionary)
    } else if *word <= state.top_word() {
        Some(Rejection::NotAfterTop)
    } else {
        Some(Rejection::NotBeforeBottom)
    }
}

/// Letters of `word` the keyboard would refuse to type
#[must_use]
pub fn disabled_in(state: &PuzzleState, word: &Word) -> LetterSet {
    let disabled = state.disabled_letters();
    word.chars()
        .iter()
        .copied()
        .filter(|&l| disabled.contains(l))
        .collect()
}

/// One-line report of a submission
#[must_use]
pub fn describe(outcome: Outcome, word: &Word, state: &PuzzleState) -> Option<String> {
    let text = tiles(word);
    match outcome {
        Outcome::Rejected(rejection) => Some(format!("{} {rejection}", "❌".red())),
        Outcome::NarrowedTop => Some(format!(
            "⬆  {} comes before the secret. It is the new top word.",
            text.bright_cyan()
        )),
        Outcome::NarrowedBottom => Some(format!(
            "⬇  {} comes after the secret. It is the new bottom word.",
            text.bright_cyan()
        )),
        Outcome::Won | Outcome::Exhausted => {
            print_result(state);
            None
        }
        Outcome::Ignored | Outcome::Updated => None,
    }
}

/// Get user input with a prompt
fn get_user_input(prompt: &str) -> Result<String> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok("quit".to_string());
    }

    Ok(input.trim().to_string())
}
