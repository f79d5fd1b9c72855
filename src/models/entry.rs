//! Word records and the word of the day view over them.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Definitions grouped by part of speech.
pub type Definitions = BTreeMap<String, Vec<String>>;

/// Which list a stored word belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum WordKind {
    /// Cached word of the day
    WordOfDay,
    /// Personal saved-word list
    Saved,
}

impl WordKind {
    fn as_str(&self) -> &'static str {
        match self {
            WordKind::WordOfDay => "wod",
            WordKind::Saved => "saved",
        }
    }
}

impl fmt::Display for WordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A word persisted in the local store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredWord {
    /// Stable identifier derived from kind, title and date
    pub id: String,

    pub kind: WordKind,

    /// Headword
    pub title: String,

    /// Date the word is attached to (publish date or date saved)
    pub date: DateTime<Utc>,

    /// Definitions grouped by part of speech
    #[serde(default)]
    pub definitions: Definitions,
}

impl StoredWord {
    pub fn new(
        kind: WordKind,
        title: impl Into<String>,
        date: DateTime<Utc>,
        definitions: Definitions,
    ) -> Self {
        let title = title.into();
        Self {
            id: Self::make_id(kind, &title, &date),
            kind,
            title,
            date,
            definitions,
        }
    }

    /// Hex SHA-256 over kind, lowercased title and RFC 3339 date.
    pub fn make_id(kind: WordKind, title: &str, date: &DateTime<Utc>) -> String {
        let mut hasher = Sha256::new();
        hasher.update(kind.as_str().as_bytes());
        hasher.update([0u8]);
        hasher.update(title.to_lowercase().as_bytes());
        hasher.update([0u8]);
        hasher.update(date.to_rfc3339().as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Case-insensitive title comparison, the same folding `make_id` uses.
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.trim().to_lowercase() == title.trim().to_lowercase()
    }

    /// UTC calendar day of the stored date.
    pub fn utc_day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// First part of speech and its first definition, if any.
    pub fn primary_definition(&self) -> Option<(&str, &str)> {
        self.definitions.iter().find_map(|(pos, defs)| {
            defs.iter()
                .find(|d| !d.trim().is_empty())
                .map(|d| (pos.as_str(), d.as_str()))
        })
    }
}

/// One word of the day, as shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyEntry {
    /// Publish date, normalized to UTC midnight
    pub calendar_date: DateTime<Utc>,
    pub title: String,
    pub part_of_speech: String,
    pub definition: String,
}

impl DailyEntry {
    /// UTC calendar-day key of this entry.
    pub fn utc_day(&self) -> NaiveDate {
        self.calendar_date.date_naive()
    }

    /// Build an entry from a stored word of the day.
    ///
    /// Returns `None` for saved words and for records without any definition.
    pub fn from_stored(word: &StoredWord) -> Option<Self> {
        if word.kind != WordKind::WordOfDay {
            return None;
        }
        let (pos, definition) = word.primary_definition()?;
        Some(Self {
            calendar_date: word.date,
            title: word.title.clone(),
            part_of_speech: pos.to_string(),
            definition: definition.to_string(),
        })
    }

    /// Definitions map in the shape the store persists.
    pub fn definitions(&self) -> Definitions {
        let mut map = Definitions::new();
        map.insert(self.part_of_speech.clone(), vec![self.definition.clone()]);
        map
    }

    /// Format entry for display using a template.
    ///
    /// Supported placeholders: `{date}`, `{title}`, `{pos}`, `{definition}`
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{date}", &self.utc_day().to_string())
            .replace("{title}", &self.title)
            .replace("{pos}", &self.part_of_speech)
            .replace("{definition}", &self.definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn wod(title: &str, defs: Definitions) -> StoredWord {
        let date = Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap();
        StoredWord::new(WordKind::WordOfDay, title, date, defs)
    }

    #[test]
    fn test_id_is_stable_and_case_insensitive() {
        let date = Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap();
        let a = StoredWord::make_id(WordKind::WordOfDay, "Petrichor", &date);
        let b = StoredWord::make_id(WordKind::WordOfDay, "petrichor", &date);
        let c = StoredWord::make_id(WordKind::Saved, "petrichor", &date);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_title_matches_folds_non_ascii() {
        let word = wod("Éclair", Definitions::new());
        assert!(word.title_matches("éclair"));
        assert!(word.title_matches("  ÉCLAIR "));
        assert!(!word.title_matches("eclair"));
        assert_eq!(word.id, wod("éclair", Definitions::new()).id);
    }

    #[test]
    fn test_from_stored_takes_first_definition() {
        let mut defs = Definitions::new();
        defs.insert("noun".into(), vec!["".into(), "the smell of rain".into()]);
        let entry = DailyEntry::from_stored(&wod("petrichor", defs)).unwrap();

        assert_eq!(entry.part_of_speech, "noun");
        assert_eq!(entry.definition, "the smell of rain");
        assert_eq!(entry.utc_day().to_string(), "2024-03-09");
    }

    #[test]
    fn test_from_stored_rejects_empty_definitions() {
        assert!(DailyEntry::from_stored(&wod("petrichor", Definitions::new())).is_none());
    }

    #[test]
    fn test_from_stored_rejects_saved_words() {
        let mut word = wod("petrichor", Definitions::new());
        word.kind = WordKind::Saved;
        word.definitions.insert("noun".into(), vec!["rain smell".into()]);
        assert!(DailyEntry::from_stored(&word).is_none());
    }

    #[test]
    fn test_format() {
        let mut defs = Definitions::new();
        defs.insert("noun".into(), vec!["the smell of rain".into()]);
        let entry = DailyEntry::from_stored(&wod("petrichor", defs)).unwrap();
        assert_eq!(
            entry.format("{date} {title} ({pos}): {definition}"),
            "2024-03-09 petrichor (noun): the smell of rain"
        );
    }
}
