//! Error types for the meme-search crate.
//!
//! All errors use stable string messages suitable for display to users
//! and programmatic handling. Search queries never appear in error messages.

/// Errors that can occur while building or running a meme search.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request to a meme source failed or returned a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A source response or a configured selector could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// A source did not respond within the configured timeout.
    #[error("source timed out: {0}")]
    Timeout(String),

    /// Invalid search configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Normalisation resources (stopwords, lemma dictionary) are missing or malformed.
    #[error("resource error: {0}")]
    Resource(String),
}

/// Convenience type alias for meme-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
