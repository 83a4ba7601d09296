//! Runtime configuration
//!
//! Every option can come from the command line or the environment.

use crate::core::{Dictionary, Word};
use crate::oracle::{DEFAULT_PAGE_SIZE, DictionaryOracle, LocalWordStore, SystemClock};
use crate::session::{Session, SessionConfig};
use crate::storage::FileStorage;
use crate::wordlists::FALLBACK_WORDS;
use crate::wordlists::loader::{load_from_file, words_from_slice};
use clap::Args;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const STORE_FILE: &str = "words.json";
const STORAGE_FILE: &str = "local_storage.json";
const LOG_FILE: &str = "frantic_five.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("UTC offset must be between -23 and 23 hours, got {0}")]
    InvalidUtcOffset(i32),
    #[error("failed to read word list {}", .path.display())]
    Wordlist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("word list {} contains no valid 5-letter words", .0.display())]
    EmptyWordlist(PathBuf),
}

/// Options shared by every command
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Directory for the word store, saved progress and logs
    #[arg(long, global = true, env = "FRANTIC_FIVE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Hours east of UTC at which the puzzle day starts
    #[arg(
        long,
        global = true,
        env = "FRANTIC_FIVE_UTC_OFFSET",
        default_value_t = crate::oracle::DEFAULT_UTC_OFFSET_HOURS,
        allow_hyphen_values = true
    )]
    pub utc_offset: i32,

    /// How long rejection messages stay visible, in milliseconds
    #[arg(long, global = true, env = "FRANTIC_FIVE_FEEDBACK_MS", default_value_t = 1500)]
    pub feedback_ms: u64,

    /// Words fetched per dictionary page
    #[arg(long, global = true, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: usize,

    /// Attempts allowed before the game ends (unlimited if unset)
    #[arg(long, global = true)]
    pub max_attempts: Option<u32>,

    /// Word file replacing the built-in fallback list
    #[arg(short = 'w', long, global = true)]
    pub wordlist: Option<PathBuf>,

    /// Log level for this crate (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub clock: SystemClock,
    pub feedback_delay: Duration,
    pub page_size: usize,
    pub max_attempts: Option<u32>,
    pub wordlist: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl ConfigArgs {
    /// Validate the options and fill in defaults
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidUtcOffset` for offsets outside ±23 hours.
    pub fn resolve(self) -> Result<Config, ConfigError> {
        let clock = SystemClock::from_hours(self.utc_offset)
            .ok_or(ConfigError::InvalidUtcOffset(self.utc_offset))?;

        Ok(Config {
            data_dir: self.data_dir.unwrap_or_else(default_data_dir),
            clock,
            feedback_delay: Duration::from_millis(self.feedback_ms),
            page_size: self.page_size.max(1),
            max_attempts: self.max_attempts.filter(|&n| n > 0),
            wordlist: self.wordlist,
            log_level: self.log_level,
        })
    }
}

/// Platform data directory, or `./.frantic_five` when none is known
#[must_use]
pub fn default_data_dir() -> PathBuf {
    ProjectDirs::from("io", "franticfive", "frantic_five").map_or_else(
        || PathBuf::from(".frantic_five"),
        |dirs| dirs.data_dir().to_path_buf(),
    )
}

impl Config {
    /// Defaults rooted at `data_dir`
    #[must_use]
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            clock: SystemClock::default(),
            feedback_delay: crate::session::DEFAULT_FEEDBACK_DELAY,
            page_size: DEFAULT_PAGE_SIZE,
            max_attempts: None,
            wordlist: None,
            log_level: None,
        }
    }

    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(STORE_FILE)
    }

    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.data_dir.join(STORAGE_FILE)
    }

    #[must_use]
    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(LOG_FILE)
    }

    #[must_use]
    pub const fn session_config(&self) -> SessionConfig {
        SessionConfig {
            feedback_delay: self.feedback_delay,
            max_attempts: self.max_attempts,
        }
    }

    /// The built-in list, or the configured word file
    ///
    /// # Errors
    /// Fails if the word file cannot be read or holds no valid words.
    pub fn fallback_words(&self) -> Result<Vec<Word>, ConfigError> {
        let Some(path) = &self.wordlist else {
            return Ok(words_from_slice(FALLBACK_WORDS));
        };
        let words = load_from_file(path).map_err(|source| ConfigError::Wordlist {
            path: path.clone(),
            source,
        })?;
        if words.is_empty() {
            return Err(ConfigError::EmptyWordlist(path.clone()));
        }
        tracing::info!(count = words.len(), "Loaded word list from {:?}", path);
        Ok(words)
    }

    /// Open the word store, seeding it with the fallback list on first use
    ///
    /// # Errors
    /// Fails if the fallback list cannot be loaded.
    pub fn open_store(&self) -> Result<LocalWordStore, ConfigError> {
        Ok(self.seeded_store(&self.fallback_words()?))
    }

    fn seeded_store(&self, fallback: &[Word]) -> LocalWordStore {
        let mut store = LocalWordStore::open(self.store_path(), self.clock);
        if let Err(e) = store.seed_if_empty(fallback) {
            tracing::warn!("Could not seed word store: {}", e);
        }
        store
    }

    /// Wire up a session over the on-disk store and storage
    ///
    /// # Errors
    /// Fails if the fallback list cannot be loaded.
    pub fn open_session(&self) -> Result<Session<LocalWordStore, FileStorage>, ConfigError> {
        let words = self.fallback_words()?;
        let store = self.seeded_store(&words);
        let oracle =
            DictionaryOracle::new(store, Dictionary::new(words)).with_page_size(self.page_size);
        let storage = FileStorage::open(self.storage_path());
        Ok(Session::new(oracle, storage, self.session_config()))
    }
}
