//! # memefinder
//!
//! A small local web service that answers free-text queries with memes
//! scraped from public listings. All scraping, normalisation and matching
//! lives in the [`meme_search`] crate; this crate only loads configuration,
//! builds the search once at startup and serves it over HTTP.

pub mod config;
pub mod error;
pub mod server;

use std::sync::Arc;

use meme_search::{MemeSearch, Normalizer};

pub use config::{AppConfig, ServerConfig};
pub use error::{AppError, Result};
pub use server::{MemeServer, SearchResponse};

/// Load normalisation resources and bind every configured source.
///
/// Resources are loaded exactly once here and shared by every request.
///
/// # Errors
///
/// Returns [`AppError::Search`] if a resource is missing or malformed, or
/// if the search configuration is invalid. Both are fatal at startup.
pub fn build_search(config: &AppConfig) -> Result<Arc<MemeSearch>> {
    let normalizer = Arc::new(Normalizer::from_config(&config.search.normalize)?);
    let search = MemeSearch::new(config.search.clone(), normalizer)?;
    Ok(Arc::new(search))
}
