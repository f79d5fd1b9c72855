//! Service layer for the dictionary application.
//!
//! - Remote word of the day source (`WordOfDaySource`)
//! - Wordnik HTTP client (`WordnikClient`)

mod wordnik;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::error::RemoteError;
use crate::models::WordnikWod;

pub use wordnik::WordnikClient;

/// A remote provider of words of the day.
///
/// Every call is independent; one failing date says nothing about another.
#[async_trait]
pub trait WordOfDaySource: Send + Sync {
    /// Fetch the raw word of the day published for `date`.
    async fn fetch_word_of_day(&self, date: NaiveDate) -> Result<WordnikWod, RemoteError>;
}
