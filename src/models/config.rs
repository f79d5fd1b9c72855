//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Environment variable that overrides `wordnik.api_key`.
pub const API_KEY_ENV: &str = "WORDNIK_API_KEY";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Wordnik API client settings
    #[serde(default)]
    pub wordnik: WordnikConfig,

    /// Word of the day window settings
    #[serde(default)]
    pub sync: SyncConfig,

    /// Local store settings
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Replace the API key with `WORDNIK_API_KEY` when it is set.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.wordnik.api_key = key;
            }
        }
        self
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.wordnik.user_agent.trim().is_empty() {
            return Err(AppError::validation("wordnik.user_agent is empty"));
        }
        if self.wordnik.timeout_secs == 0 {
            return Err(AppError::validation("wordnik.timeout_secs must be > 0"));
        }
        let base = url::Url::parse(&self.wordnik.base_url)?;
        if base.cannot_be_a_base() {
            return Err(AppError::validation(
                "wordnik.base_url must be an absolute http(s) URL",
            ));
        }
        if self.sync.window_days == 0 {
            return Err(AppError::validation("sync.window_days must be > 0"));
        }
        if self.sync.max_concurrent == 0 {
            return Err(AppError::validation("sync.max_concurrent must be > 0"));
        }
        if self.storage.words_file.trim().is_empty() {
            return Err(AppError::validation("storage.words_file is empty"));
        }
        Ok(())
    }
}

/// Wordnik HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordnikConfig {
    /// API root, without trailing endpoint
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// API key sent as the `api_key` query parameter
    #[serde(default)]
    pub api_key: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for WordnikConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            api_key: String::new(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Rolling window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Number of calendar days kept, today included
    #[serde(default = "defaults::window_days")]
    pub window_days: u32,

    /// Maximum concurrent remote requests
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            window_days: defaults::window_days(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Local store settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Word file, relative to the storage directory
    #[serde(default = "defaults::words_file")]
    pub words_file: String,
}

impl StorageConfig {
    pub fn words_path(&self, storage_dir: &Path) -> PathBuf {
        storage_dir.join(&self.words_file)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            words_file: defaults::words_file(),
        }
    }
}

mod defaults {
    pub fn base_url() -> String {
        "https://api.wordnik.com/v4".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; dictionary/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }

    pub fn window_days() -> u32 {
        7
    }
    pub fn max_concurrent() -> usize {
        7
    }

    pub fn words_file() -> String {
        "words.json".into()
    }
}
