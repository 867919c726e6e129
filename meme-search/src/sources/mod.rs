//! Meme source implementations.
//!
//! Each module provides a struct implementing [`crate::source::SourceFetcher`]
//! that scrapes one site's listing page. [`Fetcher`] is the closed set of
//! those implementations, chosen from a [`SourceConfig`] at startup.

pub mod imgur;
pub mod reddit;

pub use imgur::ImgurSource;
pub use reddit::RedditSource;

use scraper::{ElementRef, Selector};
use url::Url;

use crate::config::{Selectors, SourceConfig};
use crate::error::SearchError;
use crate::source::SourceFetcher;
use crate::types::{Meme, MemeSource};

/// A configured source, dispatching to the concrete implementation.
pub enum Fetcher {
    Reddit(RedditSource),
    Imgur(ImgurSource),
}

impl Fetcher {
    /// Build the fetcher that handles `config.source`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the URL or a selector is invalid.
    pub fn from_config(config: &SourceConfig) -> Result<Self, SearchError> {
        Ok(match config.source {
            MemeSource::Reddit => Self::Reddit(RedditSource::new(config)?),
            MemeSource::Imgur => Self::Imgur(ImgurSource::new(config)?),
        })
    }
}

impl SourceFetcher for Fetcher {
    async fn fetch(&self, client: &reqwest::Client) -> Result<Vec<Meme>, SearchError> {
        match self {
            Self::Reddit(source) => source.fetch(client).await,
            Self::Imgur(source) => source.fetch(client).await,
        }
    }

    fn source(&self) -> MemeSource {
        match self {
            Self::Reddit(source) => source.source(),
            Self::Imgur(source) => source.source(),
        }
    }
}

/// [`Selectors`] parsed into `scraper` selectors.
#[derive(Debug, Clone)]
pub struct CompiledSelectors {
    pub container: Selector,
    pub image: Selector,
    pub title: Option<Selector>,
    pub score: Option<Selector>,
}

impl CompiledSelectors {
    /// Parse every selector in `selectors`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Parse`] naming the first selector that is not valid CSS.
    pub fn compile(selectors: &Selectors) -> Result<Self, SearchError> {
        Ok(Self {
            container: parse_selector("container", &selectors.container)?,
            image: parse_selector("image", &selectors.image)?,
            title: selectors
                .title
                .as_deref()
                .map(|s| parse_selector("title", s))
                .transpose()?,
            score: selectors
                .score
                .as_deref()
                .map(|s| parse_selector("score", s))
                .transpose()?,
        })
    }
}

fn parse_selector(field: &str, css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css)
        .map_err(|e| SearchError::Parse(format!("invalid {field} selector {css:?}: {e:?}")))
}

/// Parse a source URL, used as the base for relative image links.
pub(crate) fn parse_base_url(config: &SourceConfig) -> Result<Url, SearchError> {
    Url::parse(&config.url).map_err(|e| {
        SearchError::Config(format!("{} url {:?} is invalid: {e}", config.source, config.url))
    })
}

/// Concatenated, trimmed text content of an element.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Resolve an image `src` against the page URL.
///
/// Handles protocol-relative (`//i.imgur.com/…`) and path-relative links.
/// Falls back to the raw attribute if it cannot be joined.
pub(crate) fn resolve_image_url(base: &Url, src: &str) -> String {
    let src = src.trim();
    if src.is_empty() {
        return String::new();
    }
    base.join(src)
        .map(String::from)
        .unwrap_or_else(|_| src.to_owned())
}

/// Parse score text as an integer, 0 when it is not one.
pub(crate) fn parse_score(text: &str) -> i64 {
    text.trim().parse().unwrap_or(0)
}
