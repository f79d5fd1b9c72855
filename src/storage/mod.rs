//! Storage abstractions for word persistence.
//!
//! Both the word of the day cache and the saved-word list live in one
//! store; every query is scoped by [`WordKind`].
//!
//! ## File Layout
//!
//! ```text
//! {storage_dir}/
//! ├── config.toml           # Application configuration
//! └── words.json            # All stored words
//! ```

pub mod local;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::models::{Definitions, StoredWord, WordKind};

// Re-export for convenience
pub use local::LocalStorage;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Contents of `words.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordsData {
    /// Timestamp of the last write
    pub updated_at: DateTime<Utc>,
    /// Total word count
    pub count: usize,
    /// The words array
    pub words: Vec<StoredWord>,
}

impl WordsData {
    pub fn new(words: Vec<StoredWord>) -> Self {
        Self {
            updated_at: Utc::now(),
            count: words.len(),
            words,
        }
    }
}

/// Trait for word storage backends.
///
/// Each call commits on its own; there is no transaction spanning calls.
#[async_trait]
pub trait WordStore: Send + Sync {
    /// All stored words of one kind.
    async fn fetch_words(&self, kind: WordKind) -> StoreResult<Vec<StoredWord>>;

    /// Delete the given words. Ids that are no longer present are ignored.
    ///
    /// Returns the number of words actually removed.
    async fn delete_words(&self, words: &[StoredWord]) -> StoreResult<usize>;

    /// Insert a word, replacing an existing record with the same id.
    ///
    /// For [`WordKind::Saved`] a record with the same title (ignoring case)
    /// is also replaced, so the saved list holds each title once.
    async fn add_word(
        &self,
        kind: WordKind,
        title: &str,
        date: DateTime<Utc>,
        definitions: Definitions,
    ) -> StoreResult<StoredWord>;
}
