//! Frantic Five - CLI
//!
//! Daily word-deduction puzzle with TUI and line modes, plus simulation and
//! word-store administration.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use frantic_five::{
    commands::{Guesser, read_input, run_add_words, run_simple, run_simulation},
    config::{Config, ConfigArgs},
    core::{Dictionary, Word},
    logging::{self, LogTarget},
    output::{print_add_words_report, print_simulation_result},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::io;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "frantic_five",
    about = "Find the secret word hiding between the top and bottom words",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    config: ConfigArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (today's puzzle without the TUI)
    Simple,

    /// Play many games automatically and report attempt statistics
    Simulate {
        /// Number of secret words to play
        #[arg(short = 'n', long, default_value = "200")]
        count: usize,

        /// Guesser: bisect (default) or random
        #[arg(short, long, default_value = "bisect")]
        guesser: String,

        /// Seed for secret selection and starting bounds
        #[arg(long, default_value = "0")]
        seed: u64,
    },

    /// Add words to the word store (reads stdin when no words are given)
    AddWords {
        /// Words separated by commas or whitespace
        words: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.config.resolve()?;

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    // The TUI owns the terminal, so its logs go to a file
    let target = match command {
        Commands::Play => LogTarget::File(config.log_path()),
        _ => LogTarget::Stderr,
    };
    logging::init(config.log_level.as_deref(), &target)?;
    tracing::debug!(data_dir = %config.data_dir.display(), "Configuration resolved");

    match command {
        Commands::Play => run_play_command(&config),
        Commands::Simple => run_simple_command(&config),
        Commands::Simulate {
            count,
            guesser,
            seed,
        } => run_simulate_command(&config, count, &guesser, seed),
        Commands::AddWords { words } => run_add_words_command(&config, &words),
    }
}

fn run_play_command(config: &Config) -> Result<()> {
    use frantic_five::interactive::{App, run_tui};

    let session = config.open_session()?;
    run_tui(App::new(session))
}

fn run_simple_command(config: &Config) -> Result<()> {
    let mut session = config.open_session()?;
    run_simple(&mut session)
}

fn run_simulate_command(config: &Config, count: usize, guesser: &str, seed: u64) -> Result<()> {
    let words = config.fallback_words()?;
    let dictionary = Arc::new(Dictionary::new(words));

    // Secrets need a word on each side
    let interior = dictionary.words().get(1..dictionary.len().saturating_sub(1));
    let mut secrets: Vec<Word> = interior.unwrap_or_default().to_vec();
    secrets.shuffle(&mut StdRng::seed_from_u64(seed));
    secrets.truncate(count);

    let guesser = Guesser::from_name(guesser);
    println!(
        "Simulating {} games over {} words with the {guesser:?} guesser...",
        secrets.len(),
        dictionary.len()
    );

    let result = run_simulation(&dictionary, &secrets, guesser, seed, true);
    print_simulation_result(&result);
    Ok(())
}

fn run_add_words_command(config: &Config, words: &[String]) -> Result<()> {
    let input = read_input(words, io::stdin().lock()).context("failed to read words from stdin")?;
    let mut store = config.open_store()?;
    let report = run_add_words(&mut store, &input)
        .with_context(|| format!("failed to add words to {}", store.path().display()))?;
    print_add_words_report(&report, store.len());
    Ok(())
}
