//! Utility functions and helpers.

pub mod http;

use url::Url;

/// Copy of `url` with the query string removed, safe to log when the
/// query carries credentials.
pub fn without_query(url: &Url) -> String {
    let mut shown = url.clone();
    shown.set_query(None);
    shown.to_string()
}
