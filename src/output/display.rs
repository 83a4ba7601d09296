//! Display functions for command results

use super::formatters::{
    COME_BACK_MESSAGE, congrats_message, create_progress_bar, exhausted_message, guess_tiles,
    share_text, tiles,
};
use crate::commands::SimulationResult;
use crate::engine::{PuzzleState, Status};
use crate::oracle::AddWordsReport;
use colored::Colorize;

/// Print the bounds, the guess row, and the counters
pub fn print_board(state: &PuzzleState) {
    println!("\n{}", "─".repeat(40).cyan());
    println!(
        "  Top:      {}{}",
        tiles(&state.top_word()).bright_cyan().bold(),
        if state.bounds_snapshot().top_word_updated {
            " ↓".bright_black()
        } else {
            "".normal()
        }
    );
    println!("  Guess:    {}", guess_tiles(state.guess()).bright_white());
    println!(
        "  Bottom:   {}{}",
        tiles(&state.bottom_word()).bright_cyan().bold(),
        if state.bounds_snapshot().bottom_word_updated {
            " ↑".bright_black()
        } else {
            "".normal()
        }
    );
    println!("{}", "─".repeat(40).cyan());

    let attempts = match state.max_attempts() {
        Some(max) => format!("{}/{max}", state.attempts()),
        None => state.attempts().to_string(),
    };
    println!("  Attempts: {}", attempts.bright_yellow());

    let disabled = state.disabled_letters();
    if !disabled.is_empty() {
        println!(
            "  Disabled: {}",
            disabled.to_string().to_uppercase().bright_black()
        );
    }
    if state.powerup_available() {
        println!("  Power-up: {}", "ready (type 'power')".green());
    }
    println!();
}

/// Print the end-of-game summary
pub fn print_result(state: &PuzzleState) {
    let Some(secret) = state.revealed_secret() else {
        return;
    };

    println!("\n{}", "═".repeat(70).bright_cyan());
    match state.status() {
        Status::Won => {
            println!(
                "{}",
                "    🎉 🎊 ✨  F R A N T I C   F I V E   S O L V E D !  ✨ 🎊 🎉    "
                    .bright_green()
                    .bold()
            );
            println!("{}", "═".repeat(70).bright_cyan());
            println!("\n  {}", congrats_message(&secret, state.attempts()).bright_white());
            println!(
                "  {}",
                share_text(state.date(), state.attempts()).bright_black()
            );
        }
        Status::Exhausted | Status::InProgress => {
            println!(
                "  {}",
                exhausted_message(&secret, state.attempts()).red().bold()
            );
        }
    }
    println!("\n  {}", COME_BACK_MESSAGE.bright_yellow());
    println!("\n{}", "═".repeat(70).bright_cyan());
    println!();
}

/// Print the result of a simulation
#[allow(clippy::cast_precision_loss)]
pub fn print_simulation_result(result: &SimulationResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "SIMULATION RESULTS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📊 {}", "Performance:".bright_cyan().bold());
    println!("   Guesser:          {:?}", result.guesser);
    println!("   Games played:     {}", result.games);
    println!("   Games won:        {}", result.won);
    println!(
        "   Average attempts: {}",
        format!("{:.2}", result.average_attempts)
            .bright_yellow()
            .bold()
    );
    println!(
        "   Best case:        {}",
        format!("{}", result.min_attempts).green()
    );
    println!(
        "   Worst case:       {}",
        format!("{}", result.max_attempts).yellow()
    );
    println!(
        "   Starting range:   {:.1} words on average",
        result.average_initial_range
    );
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());
    println!("   Games/second:     {:.1}", result.games_per_second);

    if result.games == 0 {
        return;
    }

    println!("\n📈 {}", "Distribution:".bright_cyan().bold());
    for (&attempts, &count) in &result.distribution {
        let pct = count as f64 / result.games as f64 * 100.0;
        let bar = create_progress_bar(pct, 100.0, 40);
        println!("   {attempts:>2}: {} {count:4} ({pct:5.1}%)", bar.green());
    }

    if !result.hardest.is_empty() {
        println!("\n😰 {}", "Hardest Words".yellow().bold());
        for (word, attempts) in &result.hardest {
            println!(
                "  {} ({attempts} attempts)",
                word.as_str().to_uppercase().yellow()
            );
        }
    }
}

/// Print the outcome of an admin word import
pub fn print_add_words_report(report: &AddWordsReport, total: usize) {
    println!(
        "{} Added {} new {} ({} already present, {} in store)",
        "✓".green().bold(),
        report.added.to_string().bright_cyan().bold(),
        if report.added == 1 { "word" } else { "words" },
        report.duplicates,
        total
    );
}
