//! Wordnik word of the day payload and its normalization.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RemoteError;
use crate::models::DailyEntry;

/// Part of speech used when Wordnik omits one.
const UNKNOWN_PART_OF_SPEECH: &str = "unknown";

/// Raw `wordOfTheDay` response body.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WordnikWod {
    pub word: String,

    /// Publish day (`YYYY-MM-DD`)
    #[serde(default)]
    pub pdd: Option<String>,

    /// Publish timestamp, e.g. `2024-03-10T03:00:00.000Z` or `...+0000`
    #[serde(default)]
    pub publish_date: Option<String>,

    #[serde(default)]
    pub definitions: Vec<WordnikDefinition>,

    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WordnikDefinition {
    #[serde(default)]
    pub text: Option<String>,

    #[serde(default)]
    pub part_of_speech: Option<String>,

    #[serde(default)]
    pub source: Option<String>,
}

impl WordnikWod {
    /// UTC day the word was published for.
    ///
    /// `pdd` wins; `publishDate` is only consulted when `pdd` is absent or malformed.
    pub fn publish_day(&self) -> Option<NaiveDate> {
        self.pdd
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
            .or_else(|| {
                self.publish_date
                    .as_deref()
                    .and_then(parse_timestamp)
                    .map(|ts| ts.date_naive())
            })
    }

    /// Normalize into a `DailyEntry` dated at UTC midnight of the publish day.
    pub fn normalize(&self) -> Result<DailyEntry, RemoteError> {
        let title = self.word.trim();
        if title.is_empty() {
            return Err(RemoteError::parse("word of the day has no word"));
        }

        let day = self
            .publish_day()
            .ok_or_else(|| RemoteError::parse(format!("no publish date for '{title}'")))?;

        let definition = self
            .definitions
            .iter()
            .find(|d| d.text.as_deref().is_some_and(|t| !t.trim().is_empty()))
            .ok_or_else(|| RemoteError::parse(format!("no definition for '{title}'")))?;

        let part_of_speech = definition
            .part_of_speech
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(UNKNOWN_PART_OF_SPEECH);

        Ok(DailyEntry {
            calendar_date: day.and_time(chrono::NaiveTime::MIN).and_utc(),
            title: title.to_string(),
            part_of_speech: part_of_speech.to_string(),
            definition: definition.text.as_deref().unwrap_or_default().trim().to_string(),
        })
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .or_else(|_| DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z"))
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "_id": "65ed0a4f",
        "word": "petrichor",
        "contentProvider": { "name": "wordnik", "id": 711 },
        "definitions": [
            { "source": "wiktionary", "text": "The distinctive scent of rain on dry earth.", "note": null, "partOfSpeech": "noun" }
        ],
        "publishDate": "2024-03-10T03:00:00.000Z",
        "examples": [],
        "pdd": "2024-03-10",
        "note": "From Greek petra, stone."
    }"#;

    #[test]
    fn test_normalize_sample() {
        let wod: WordnikWod = serde_json::from_str(SAMPLE).unwrap();
        let entry = wod.normalize().unwrap();

        assert_eq!(entry.title, "petrichor");
        assert_eq!(entry.part_of_speech, "noun");
        assert_eq!(entry.definition, "The distinctive scent of rain on dry earth.");
        assert_eq!(entry.calendar_date.to_rfc3339(), "2024-03-10T00:00:00+00:00");
    }

    #[test]
    fn test_publish_date_fallback() {
        let wod = WordnikWod {
            word: "ebullient".into(),
            publish_date: Some("2024-03-08T03:00:00.000+0000".into()),
            definitions: vec![WordnikDefinition {
                text: Some("Zestfully enthusiastic.".into()),
                part_of_speech: None,
                source: None,
            }],
            ..WordnikWod::default()
        };

        let entry = wod.normalize().unwrap();
        assert_eq!(entry.utc_day().to_string(), "2024-03-08");
        assert_eq!(entry.part_of_speech, "unknown");
    }

    #[test]
    fn test_skips_blank_definitions() {
        let wod = WordnikWod {
            word: "limn".into(),
            pdd: Some("2024-03-07".into()),
            definitions: vec![
                WordnikDefinition {
                    text: Some("   ".into()),
                    part_of_speech: Some("noun".into()),
                    source: None,
                },
                WordnikDefinition {
                    text: Some("To describe.".into()),
                    part_of_speech: Some("verb".into()),
                    source: None,
                },
            ],
            ..WordnikWod::default()
        };

        let entry = wod.normalize().unwrap();
        assert_eq!(entry.part_of_speech, "verb");
        assert_eq!(entry.definition, "To describe.");
    }

    #[test]
    fn test_rejects_missing_definitions_and_dates() {
        let no_defs = WordnikWod {
            word: "limn".into(),
            pdd: Some("2024-03-07".into()),
            ..WordnikWod::default()
        };
        assert!(matches!(no_defs.normalize(), Err(RemoteError::Parse(_))));

        let no_date = WordnikWod {
            word: "limn".into(),
            definitions: vec![WordnikDefinition {
                text: Some("To describe.".into()),
                ..WordnikDefinition::default()
            }],
            ..WordnikWod::default()
        };
        assert!(matches!(no_date.normalize(), Err(RemoteError::Parse(_))));
    }
}
