//! Partition of cached words against the required window.
//!
//! Computes what to keep, what to evict and which days still have to be
//! fetched. Pure: no I/O happens here.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{DailyEntry, StoredWord};

use super::window::{RequiredWindow, utc_day_key};

/// Outcome of matching cached words to the required window.
#[derive(Debug, Clone, Default)]
pub struct ReconcilePlan {
    /// Cached entries that satisfy a required day
    pub keep: Vec<DailyEntry>,
    /// Cached words to delete from the store
    pub stale: Vec<StoredWord>,
    /// Required days not satisfied by the cache, newest first
    pub missing: Vec<(NaiveDate, DateTime<Utc>)>,
}

impl ReconcilePlan {
    /// Match each cached word by its UTC day against the window.
    ///
    /// A word is kept only if its day is still required and it yields a
    /// `DailyEntry`. Everything else is stale, including a second word for
    /// a day already satisfied.
    pub fn build(mut window: RequiredWindow, cached: Vec<StoredWord>) -> Self {
        let mut plan = Self::default();

        for word in cached {
            let key = utc_day_key(&word.date);
            match DailyEntry::from_stored(&word) {
                Some(entry) if window.satisfy(&key).is_some() => plan.keep.push(entry),
                _ => plan.stale.push(word),
            }
        }

        plan.missing = window.into_missing();
        plan
    }

    /// Check if the cache already covers the whole window.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}
