// src/pipeline/sync.rs

//! Rolling word of the day window.
//!
//! Each pass reads the cached words of the day, evicts the ones outside the
//! window, fetches the missing days from the remote source and stores what
//! arrived. This is a read-repair: the store is corrected as a side effect
//! of producing the result, one independently committed call at a time.
//!
//! Failures never reach the caller. A day that is neither cached nor
//! fetchable is simply absent from the output.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};
use futures::stream::{self, StreamExt};
use tokio::sync::Mutex;

use crate::error::RemoteError;
use crate::models::{DailyEntry, StoredWord, SyncConfig, WordKind};
use crate::services::WordOfDaySource;
use crate::storage::WordStore;

use super::reconcile::ReconcilePlan;
use super::window::RequiredWindow;

/// Counters for one reconcile pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Cached entries reused
    pub kept: usize,
    /// Cached words scheduled for deletion
    pub evicted: usize,
    /// Days requested from the remote source
    pub requested: usize,
    /// Days fetched and added to the output
    pub fetched: usize,
    /// Days requested but absent from the output
    pub failed: usize,
}

/// Keeps the last `window_days` words of the day cached in a [`WordStore`].
///
/// `Tz` is the zone whose calendar decides which days are required;
/// production code uses [`Local`].
pub struct RollingWindowSync<S: ?Sized, R: ?Sized, Tz: TimeZone = Local> {
    store: Arc<S>,
    source: Arc<R>,
    tz: Tz,
    window_days: u32,
    max_concurrent: usize,
    /// Held for a whole pass so overlapping calls run one after another
    in_flight: Mutex<()>,
}

impl<S, R> RollingWindowSync<S, R, Local>
where
    S: WordStore + ?Sized,
    R: WordOfDaySource + ?Sized,
{
    pub fn new(store: Arc<S>, source: Arc<R>, config: &SyncConfig) -> Self {
        Self {
            store,
            source,
            tz: Local,
            window_days: config.window_days,
            max_concurrent: config.max_concurrent,
            in_flight: Mutex::new(()),
        }
    }
}

impl<S, R, Tz> RollingWindowSync<S, R, Tz>
where
    S: WordStore + ?Sized,
    R: WordOfDaySource + ?Sized,
    Tz: TimeZone + Send + Sync,
    Tz::Offset: Send + Sync,
{
    /// Use another zone for the required-day calendar.
    pub fn with_timezone<Tz2: TimeZone>(self, tz: Tz2) -> RollingWindowSync<S, R, Tz2> {
        RollingWindowSync {
            store: self.store,
            source: self.source,
            tz,
            window_days: self.window_days,
            max_concurrent: self.max_concurrent,
            in_flight: self.in_flight,
        }
    }

    /// Entries for the window ending at `now`, newest first.
    pub async fn reconcile(&self, now: DateTime<Utc>) -> Vec<DailyEntry> {
        self.reconcile_with_report(now).await.0
    }

    /// Like [`reconcile`](Self::reconcile), also returning pass counters.
    pub async fn reconcile_with_report(
        &self,
        now: DateTime<Utc>,
    ) -> (Vec<DailyEntry>, ReconcileReport) {
        let _flight = self.in_flight.lock().await;

        let window = RequiredWindow::new(now, &self.tz, self.window_days);
        if window.is_empty() {
            log::warn!("Word of the day window is empty; evicting every cached word");
        } else if let Some((oldest, newest)) = window.bounds() {
            log::debug!(
                "Reconciling {} words of the day {} ..= {}",
                window.len(),
                oldest,
                newest
            );
        }

        let cached = match self.store.fetch_words(WordKind::WordOfDay).await {
            Ok(words) => words,
            Err(e) => {
                log::warn!("Failed to read cached words, refetching all days: {}", e);
                Vec::new()
            }
        };

        let plan = ReconcilePlan::build(window, cached);
        let mut report = ReconcileReport {
            kept: plan.keep.len(),
            evicted: plan.stale.len(),
            requested: plan.missing.len(),
            ..ReconcileReport::default()
        };

        // A stale word can share its day (and id) with a refetched one, so
        // nothing is written until eviction has finished.
        let fetched = if plan.is_complete() {
            self.evict(&plan.stale).await;
            Vec::new()
        } else {
            let ((), fetched) =
                tokio::join!(self.evict(&plan.stale), self.fetch_missing(&plan.missing));
            fetched
        };
        for entry in &fetched {
            self.persist(entry).await;
        }

        report.fetched = fetched.len();
        report.failed = report.requested - report.fetched;

        let mut entries = plan.keep;
        entries.extend(fetched);
        entries.sort_by(|a, b| b.calendar_date.cmp(&a.calendar_date));

        log::info!(
            "Words of the day: {} cached, {} evicted, {}/{} fetched",
            report.kept,
            report.evicted,
            report.fetched,
            report.requested
        );

        (entries, report)
    }

    async fn evict(&self, stale: &[StoredWord]) {
        if stale.is_empty() {
            return;
        }
        match self.store.delete_words(stale).await {
            Ok(removed) => log::debug!("Evicted {} stale words of the day", removed),
            Err(e) => log::warn!("Failed to evict {} stale words: {}", stale.len(), e),
        }
    }

    /// Fetch every missing day concurrently and keep the ones that arrive
    /// for a still pending day. Nothing is stored here.
    async fn fetch_missing(&self, missing: &[(NaiveDate, DateTime<Utc>)]) -> Vec<DailyEntry> {
        let results: Vec<(NaiveDate, Result<DailyEntry, RemoteError>)> =
            stream::iter(missing.iter().copied())
                .map(|(key, target)| async move {
                    log::debug!("Requesting word of the day {} (target {})", key, target);
                    let result = self
                        .source
                        .fetch_word_of_day(key)
                        .await
                        .and_then(|raw| raw.normalize());
                    (key, result)
                })
                .buffer_unordered(self.max_concurrent.max(1))
                .collect()
                .await;

        let mut pending: HashSet<NaiveDate> = missing.iter().map(|(key, _)| *key).collect();
        let mut fetched = Vec::with_capacity(results.len());

        for (key, result) in results {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Word of the day {} unavailable: {}", key, e);
                    continue;
                }
            };

            if !pending.remove(&entry.utc_day()) {
                log::warn!(
                    "Dropping '{}' dated {} received for {}: day not pending",
                    entry.title,
                    entry.utc_day(),
                    key
                );
                continue;
            }

            fetched.push(entry);
        }

        fetched
    }

    async fn persist(&self, entry: &DailyEntry) {
        if let Err(e) = self
            .store
            .add_word(
                WordKind::WordOfDay,
                &entry.title,
                entry.calendar_date,
                entry.definitions(),
            )
            .await
        {
            log::warn!("Failed to store word of the day '{}': {}", entry.title, e);
        }
    }
}
