//! Calendar-day keys and the set of days a reconcile pass must cover.
//!
//! Required days are keyed by the *local* calendar day, while stored words
//! are matched by their *UTC* calendar day. Near midnight the two can
//! disagree by one day; callers must keep using the matching helper for
//! each side.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, NaiveDate, TimeDelta, TimeZone, Utc};

/// Local calendar day of `ts` in `tz`.
pub fn local_day_key<Tz: TimeZone>(ts: &DateTime<Utc>, tz: &Tz) -> NaiveDate {
    ts.with_timezone(tz).date_naive()
}

/// UTC calendar day of `ts`.
pub fn utc_day_key(ts: &DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

/// Days still required, keyed by local calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredWindow {
    days: BTreeMap<NaiveDate, DateTime<Utc>>,
}

impl RequiredWindow {
    /// The local day of `now` and the `days - 1` local days before it.
    pub fn new<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz, days: u32) -> Self {
        let local_now = now.with_timezone(tz);
        let days = (0..days)
            .map(|offset| {
                let target = local_now
                    .clone()
                    .checked_sub_days(Days::new(u64::from(offset)))
                    .map(|t| t.with_timezone(&Utc))
                    .unwrap_or_else(|| now - TimeDelta::days(i64::from(offset)));
                (local_day_key(&target, tz), target)
            })
            .collect();
        Self { days }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Mark a day as satisfied, returning its target timestamp if it was still required.
    pub fn satisfy(&mut self, key: &NaiveDate) -> Option<DateTime<Utc>> {
        self.days.remove(key)
    }

    /// Oldest and newest required day.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.days.keys().next()?;
        let last = self.days.keys().next_back()?;
        Some((*first, *last))
    }

    /// Remaining days, newest first.
    pub fn into_missing(self) -> Vec<(NaiveDate, DateTime<Utc>)> {
        self.days.into_iter().rev().collect()
    }
}
