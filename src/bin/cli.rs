//! Dictionary CLI
//!
//! Word of the day window and saved-word list backed by a local store.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use clap::{Parser, Subcommand};
use dictionary::{
    error::{AppError, Result},
    models::{Config, DailyEntry, Definitions, WordKind},
    pipeline::RollingWindowSync,
    services::WordnikClient,
    storage::{LocalStorage, WordStore},
};

/// Dictionary - word of the day and saved words
#[derive(Parser, Debug)]
#[command(name = "dictionary", version, about = "Word of the day and saved words")]
struct Cli {
    /// Path to storage directory containing config and word files
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the words of the last days, fetching what is missing
    Wod,

    /// Add a word to the saved list
    Save {
        word: String,

        #[arg(short, long)]
        definition: String,

        /// Part of speech
        #[arg(short, long, default_value = "unknown")]
        pos: String,
    },

    /// List saved words, newest first
    Saved,

    /// Remove a word from the saved list
    Forget { word: String },

    /// Validate configuration file
    Validate,

    /// Show storage info
    Info,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path).with_env_overrides();
    log::debug!("Loaded configuration from {}", cli.storage_dir.display());

    let words_path = config.storage.words_path(&cli.storage_dir);
    let storage = Arc::new(LocalStorage::new(&words_path));

    match cli.command {
        Command::Wod => {
            config.validate()?;
            let client = Arc::new(WordnikClient::new(&config.wordnik)?);
            let sync = RollingWindowSync::new(Arc::clone(&storage), client, &config.sync);

            let entries = sync.reconcile(Utc::now()).await;
            if entries.is_empty() {
                log::warn!("No words of the day available");
            }
            for entry in &entries {
                println!("{}", entry.format("{date}  {title} ({pos}): {definition}"));
            }
        }

        Command::Save {
            word,
            definition,
            pos,
        } => {
            if word.trim().is_empty() {
                return Err(AppError::validation("word is empty"));
            }
            let mut definitions = Definitions::new();
            definitions.insert(pos, vec![definition]);

            let saved = storage
                .add_word(WordKind::Saved, &word, Utc::now(), definitions)
                .await?;
            log::info!("Saved '{}'", saved.title);
        }

        Command::Saved => {
            let mut words = storage.fetch_words(WordKind::Saved).await?;
            words.sort_by(|a, b| b.date.cmp(&a.date));

            if words.is_empty() {
                log::info!("Saved list is empty");
            }
            for word in &words {
                let summary = word
                    .primary_definition()
                    .map(|(pos, def)| format!(" ({pos}): {def}"))
                    .unwrap_or_default();
                println!("{}  {}{}", word.date.date_naive(), word.title, summary);
            }
        }

        Command::Forget { word } => {
            let matches: Vec<_> = storage
                .fetch_words(WordKind::Saved)
                .await?
                .into_iter()
                .filter(|w| w.title_matches(&word))
                .collect();

            if matches.is_empty() {
                log::warn!("'{}' is not in the saved list", word);
                return Ok(());
            }
            let removed = storage.delete_words(&matches).await?;
            log::info!("Removed {} saved word(s)", removed);
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            if config.wordnik.api_key.trim().is_empty() {
                log::warn!(
                    "wordnik.api_key is empty (set it in config.toml or {})",
                    dictionary::models::API_KEY_ENV
                );
            }
            log::info!("✓ Config OK");
        }

        Command::Info => {
            log::info!("Storage directory: {}", cli.storage_dir.display());
            log::info!(
                "Config: {}",
                if config_path.exists() {
                    "exists"
                } else {
                    "not found, using defaults"
                }
            );

            let (wod, saved) = storage.counts().await?;
            log::info!("Words file: {}", storage.path().display());
            log::info!("Cached words of the day: {}", wod);
            log::info!("Saved words: {}", saved);

            let cached = storage.fetch_words(WordKind::WordOfDay).await?;
            let latest = cached
                .iter()
                .filter_map(DailyEntry::from_stored)
                .max_by_key(|e| e.calendar_date);
            if let Some(latest) = latest {
                log::info!(
                    "Latest word of the day: {} ({})",
                    latest.title,
                    latest.utc_day()
                );
            }
        }
    }

    Ok(())
}
