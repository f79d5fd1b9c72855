// src/services/wordnik.rs

//! Wordnik word of the day client.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::error::{AppError, RemoteError, Result};
use crate::models::{WordnikConfig, WordnikWod};
use crate::services::WordOfDaySource;
use crate::utils::{http, without_query};

const WOD_ENDPOINT: &str = "words.json/wordOfTheDay";

/// Client for `GET {base}/words.json/wordOfTheDay?date=YYYY-MM-DD`.
pub struct WordnikClient {
    client: Client,
    endpoint: Url,
    api_key: String,
}

impl WordnikClient {
    /// Create a new client with the given configuration.
    pub fn new(config: &WordnikConfig) -> Result<Self> {
        let client = http::create_async_client(config)?;
        Self::with_client(client, config)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(client: Client, config: &WordnikConfig) -> Result<Self> {
        let base = config.base_url.trim_end_matches('/');
        let endpoint = Url::parse(&format!("{base}/{WOD_ENDPOINT}"))?;
        if endpoint.cannot_be_a_base() {
            return Err(AppError::config(format!(
                "Wordnik base URL is not absolute: {}",
                config.base_url
            )));
        }

        if config.api_key.trim().is_empty() {
            log::warn!("No Wordnik API key configured; requests will likely be rejected");
        }

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
        })
    }

    /// Request URL for one day.
    pub fn wod_url(&self, date: NaiveDate) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("date", &date.format("%Y-%m-%d").to_string())
            .append_pair("api_key", &self.api_key);
        url
    }
}

#[async_trait]
impl WordOfDaySource for WordnikClient {
    async fn fetch_word_of_day(&self, date: NaiveDate) -> std::result::Result<WordnikWod, RemoteError> {
        let url = self.wod_url(date);
        log::debug!("GET {} (date={})", without_query(&url), date);

        // reqwest errors carry the request URL, which holds the API key.
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| RemoteError::Http(e.without_url()))?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(RemoteError::NotFound { date });
        }
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                url: without_query(&url),
            });
        }

        response
            .json::<WordnikWod>()
            .await
            .map_err(|e| {
                RemoteError::parse(format!("word of the day for {date}: {}", e.without_url()))
            })
    }
}
