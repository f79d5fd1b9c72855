// src/error.rs

//! Unified error handling for the dictionary application.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for dictionary operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Local store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Remote source failure
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Failure of the local word store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store is corrupt: {0}")]
    Corrupt(String),
}

/// Failure of a single remote word-of-the-day request.
#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} responded with status {status}")]
    Status { status: u16, url: String },

    #[error("unusable response: {0}")]
    Parse(String),

    #[error("no word of the day published for {date}")]
    NotFound { date: NaiveDate },
}

impl RemoteError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_converts_into_app_error() {
        let err: AppError = StoreError::Corrupt("truncated".into()).into();
        assert!(matches!(err, AppError::Store(StoreError::Corrupt(_))));
        assert_eq!(err.to_string(), "store is corrupt: truncated");
    }

    #[test]
    fn test_encoding_error_reaches_app_error_through_store() {
        let json = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: AppError = StoreError::from(json).into();
        assert!(matches!(err, AppError::Store(StoreError::Json(_))));
        assert!(err.to_string().starts_with("store encoding error:"));
    }

    #[test]
    fn test_remote_not_found_message() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let err = RemoteError::NotFound { date };
        assert_eq!(
            err.to_string(),
            "no word of the day published for 2024-03-10"
        );
    }
}
