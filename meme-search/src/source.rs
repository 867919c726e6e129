//! Trait definition for meme source backends.
//!
//! Each source (Reddit, Imgur) implements [`SourceFetcher`] to provide a
//! uniform way of turning one listing page into candidate [`Meme`]s.

use crate::error::SearchError;
use crate::types::{Meme, MemeSource};

/// A backend that scrapes candidate memes from one external site.
///
/// Implementors are bound to a fixed URL and selector set at construction
/// and handle their own:
///
/// - HTTP request to the listing page
/// - HTML parsing via CSS selectors
/// - Skipping of individual malformed posts
///
/// Whole-source failures (network, HTTP status, unreadable body) are
/// returned as [`SearchError`] values; the caller decides how to report
/// them. A source that parses but finds no posts returns `Ok(vec![])`.
///
/// All implementations must be `Send + Sync` for concurrent fetches.
pub trait SourceFetcher: Send + Sync {
    /// Fetch the listing page and return every well-formed post on it.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the HTTP request fails or returns a
    /// non-success status.
    fn fetch(
        &self,
        client: &reqwest::Client,
    ) -> impl std::future::Future<Output = Result<Vec<Meme>, SearchError>> + Send;

    /// Returns which [`MemeSource`] variant this implementation represents.
    fn source(&self) -> MemeSource;
}
