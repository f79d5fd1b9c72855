//! Local filesystem storage implementation.
//!
//! Keeps every word in a single JSON document. Writes go to a temporary
//! file first and are renamed into place, so a crash never leaves a
//! half-written `words.json` behind.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::models::{Definitions, StoredWord, WordKind};
use crate::storage::{StoreResult, WordStore, WordsData};

/// Local filesystem storage backend.
#[derive(Clone)]
pub struct LocalStorage {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Arc<Mutex<()>>,
}

impl LocalStorage {
    /// Create a new LocalStorage backed by the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> StoreResult<()> {
        self.ensure_dir().await?;

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Read all words, returning an empty list if the file doesn't exist.
    async fn read_all(&self) -> StoreResult<Vec<StoredWord>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };

        let data: WordsData = serde_json::from_slice(&bytes).map_err(|e| {
            StoreError::Corrupt(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(data.words)
    }

    async fn write_all(&self, words: Vec<StoredWord>) -> StoreResult<()> {
        let data = WordsData::new(words);
        let bytes = serde_json::to_vec_pretty(&data)?;
        self.write_bytes(&bytes).await
    }

    /// Number of stored words per kind, for status output.
    pub async fn counts(&self) -> StoreResult<(usize, usize)> {
        let words = self.read_all().await?;
        let wod = words.iter().filter(|w| w.kind == WordKind::WordOfDay).count();
        Ok((wod, words.len() - wod))
    }
}

#[async_trait]
impl WordStore for LocalStorage {
    async fn fetch_words(&self, kind: WordKind) -> StoreResult<Vec<StoredWord>> {
        let words = self.read_all().await?;
        Ok(words.into_iter().filter(|w| w.kind == kind).collect())
    }

    async fn delete_words(&self, words: &[StoredWord]) -> StoreResult<usize> {
        if words.is_empty() {
            return Ok(0);
        }

        let _guard = self.write_lock.lock().await;
        let mut all = self.read_all().await?;
        let before = all.len();
        all.retain(|w| !words.iter().any(|d| d.id == w.id));

        let removed = before - all.len();
        if removed > 0 {
            self.write_all(all).await?;
        }
        log::debug!("Deleted {} of {} requested words", removed, words.len());
        Ok(removed)
    }

    async fn add_word(
        &self,
        kind: WordKind,
        title: &str,
        date: DateTime<Utc>,
        definitions: Definitions,
    ) -> StoreResult<StoredWord> {
        let word = StoredWord::new(kind, title.trim(), date, definitions);

        let _guard = self.write_lock.lock().await;
        let mut all = self.read_all().await?;
        all.retain(|w| {
            let same_saved_title = kind == WordKind::Saved
                && w.kind == WordKind::Saved
                && w.title_matches(&word.title);
            w.id != word.id && !same_saved_title
        });
        all.push(word.clone());
        self.write_all(all).await?;

        log::debug!("Stored {} word '{}'", kind, word.title);
        Ok(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn defs(pos: &str, text: &str) -> Definitions {
        let mut map = Definitions::new();
        map.insert(pos.to_string(), vec![text.to_string()]);
        map
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, d, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_read_nonexistent() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("words.json"));

        let words = storage.fetch_words(WordKind::WordOfDay).await.unwrap();
        assert!(words.is_empty());
    }

    #[tokio::test]
    async fn test_add_and_fetch_by_kind() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("nested/words.json"));

        storage
            .add_word(WordKind::WordOfDay, "petrichor", day(9), defs("noun", "rain smell"))
            .await
            .unwrap();
        storage
            .add_word(WordKind::Saved, "limn", day(9), defs("verb", "to describe"))
            .await
            .unwrap();

        let wod = storage.fetch_words(WordKind::WordOfDay).await.unwrap();
        let saved = storage.fetch_words(WordKind::Saved).await.unwrap();
        assert_eq!(wod.len(), 1);
        assert_eq!(wod[0].title, "petrichor");
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].title, "limn");
        assert_eq!(storage.counts().await.unwrap(), (1, 1));
    }

    #[tokio::test]
    async fn test_add_same_id_replaces() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("words.json"));

        storage
            .add_word(WordKind::WordOfDay, "petrichor", day(9), defs("noun", "old"))
            .await
            .unwrap();
        storage
            .add_word(WordKind::WordOfDay, "petrichor", day(9), defs("noun", "new"))
            .await
            .unwrap();

        let wod = storage.fetch_words(WordKind::WordOfDay).await.unwrap();
        assert_eq!(wod.len(), 1);
        assert_eq!(wod[0].definitions["noun"], vec!["new".to_string()]);
    }

    #[tokio::test]
    async fn test_saved_title_is_unique() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("words.json"));

        storage
            .add_word(WordKind::Saved, "Limn", day(1), defs("verb", "to draw"))
            .await
            .unwrap();
        storage
            .add_word(WordKind::Saved, "limn", day(5), defs("verb", "to describe"))
            .await
            .unwrap();

        let saved = storage.fetch_words(WordKind::Saved).await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].date, day(5));
    }

    #[tokio::test]
    async fn test_saved_title_is_unique_beyond_ascii() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("words.json"));

        storage
            .add_word(WordKind::Saved, "Éclair", day(1), defs("noun", "a pastry"))
            .await
            .unwrap();
        storage
            .add_word(WordKind::Saved, "éclair", day(2), defs("noun", "a flash"))
            .await
            .unwrap();

        let saved = storage.fetch_words(WordKind::Saved).await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].title, "éclair");
    }

    #[tokio::test]
    async fn test_delete_ignores_missing() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("words.json"));

        let kept = storage
            .add_word(WordKind::WordOfDay, "a", day(1), defs("noun", "x"))
            .await
            .unwrap();
        let gone = storage
            .add_word(WordKind::WordOfDay, "b", day(2), defs("noun", "y"))
            .await
            .unwrap();
        let phantom = StoredWord::new(WordKind::WordOfDay, "c", day(3), Definitions::new());

        let removed = storage.delete_words(&[gone, phantom]).await.unwrap();
        assert_eq!(removed, 1);

        let wod = storage.fetch_words(WordKind::WordOfDay).await.unwrap();
        assert_eq!(wod, vec![kept]);
    }

    #[tokio::test]
    async fn test_corrupt_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("words.json");
        std::fs::write(&path, b"{ not json").unwrap();

        let storage = LocalStorage::new(&path);
        let err = storage.fetch_words(WordKind::Saved).await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_not_lost() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("words.json"));

        let adds = (1..=5).map(|d| {
            let storage = storage.clone();
            async move {
                storage
                    .add_word(WordKind::WordOfDay, &format!("w{d}"), day(d), defs("noun", "x"))
                    .await
            }
        });
        for result in futures::future::join_all(adds).await {
            result.unwrap();
        }

        let wod = storage.fetch_words(WordKind::WordOfDay).await.unwrap();
        assert_eq!(wod.len(), 5);
    }
}
