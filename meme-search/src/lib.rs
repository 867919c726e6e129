//! # meme-search
//!
//! Find memes whose titles match a free-text query.
//!
//! This crate scrapes public meme listings directly, without API keys,
//! and matches post titles against the query after
//! normalising both into content tokens.
//!
//! ## Design
//!
//! - Scrapes Reddit and Imgur listing pages using configurable CSS selectors
//! - Fetches all sources concurrently, each bounded by a timeout
//! - Normalises text: lowercase, strip markup/digits/punctuation, drop
//!   stopwords, then lemmatise (default) or Snowball-stem
//! - Binary relevance: a post matches if it shares one token with the query
//! - Matches are shuffled so repeated queries surface different memes
//! - Graceful degradation: failing sources contribute nothing and are
//!   reported per source instead of failing the search
//!
//! ## Privacy
//!
//! - No network listeners; the HTTP front end lives in the host binary
//! - Search queries are logged only at trace level
//! - Nothing is cached or persisted between searches

pub mod config;
pub mod error;
pub mod http;
pub mod normalize;
pub mod orchestrator;
pub mod source;
pub mod sources;
pub mod types;

use std::sync::Arc;

pub use config::{NormalizeConfig, NormalizeMode, SearchConfig, Selectors, SourceConfig};
pub use error::{Result, SearchError};
pub use normalize::Normalizer;
pub use orchestrator::MemeSearch;
pub use source::SourceFetcher;
pub use types::{Meme, MemeSource, ResultSet, SourceOutcome, SourceReport};

/// Search every configured source for memes matching `query`.
///
/// Builds a one-off [`MemeSearch`]; long-running callers should build one
/// at startup and reuse it.
///
/// # Errors
///
/// Returns [`SearchError::Config`] if `config` is invalid. Source failures
/// are not errors; see [`ResultSet::is_degraded`].
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> meme_search::Result<()> {
/// let normalizer = std::sync::Arc::new(meme_search::Normalizer::english()?);
/// let config = meme_search::SearchConfig::default();
/// let results = meme_search::search("cat meme", &config, normalizer).await?;
/// for meme in &results.memes {
///     println!("[{}] {}: {}", meme.source, meme.title, meme.image_url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(
    query: &str,
    config: &SearchConfig,
    normalizer: Arc<Normalizer>,
) -> Result<ResultSet> {
    let engine = MemeSearch::new(config.clone(), normalizer)?;
    Ok(engine.search(query).await)
}
