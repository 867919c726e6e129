//! Shared HTTP client with browser-like headers for meme source requests.
//!
//! Sources tend to reject requests without a realistic User-Agent, so the
//! client always sends one, either from config or picked from a built-in
//! rotation list.

use crate::config::SearchConfig;
use crate::error::SearchError;
use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::time::Duration;

/// Realistic browser User-Agent strings, one picked per client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

/// Build a [`reqwest::Client`] configured for scraping meme sources.
///
/// The client has:
/// - Cookie store enabled (some listings set consent cookies on redirect)
/// - Timeout from config
/// - User-Agent from config, or a random one from the built-in list
/// - `Accept` and `Accept-Language` default headers
/// - Brotli and gzip decompression
///
/// # Errors
///
/// Returns [`SearchError::Config`] if the configured headers are not valid
/// header values, or [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SearchConfig) -> Result<reqwest::Client, SearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => random_user_agent().to_owned(),
    };

    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    let language = HeaderValue::from_str(&config.accept_language)
        .map_err(|e| SearchError::Config(format!("invalid accept_language: {e}")))?;
    headers.insert(ACCEPT_LANGUAGE, language);

    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

/// GET `url` and return the body as text.
///
/// Non-success statuses are errors. `label` names the source in messages.
pub async fn fetch_html(
    client: &reqwest::Client,
    label: &str,
    url: &str,
) -> Result<String, SearchError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SearchError::Http(format!("{label} request failed: {e}")))?
        .error_for_status()
        .map_err(|e| SearchError::Http(format!("{label} HTTP error: {e}")))?;

    let html = response
        .text()
        .await
        .map_err(|e| SearchError::Http(format!("{label} response read failed: {e}")))?;

    tracing::trace!(source = label, bytes = html.len(), "response received");
    Ok(html)
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // USER_AGENTS is a non-empty const array; choose only returns None on empty slices
        .unwrap_or(USER_AGENTS[0])
}
