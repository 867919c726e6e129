//! Search configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which sources are scraped, the selectors used
//! to pick posts out of each source's markup, timeouts, and result limits.
//! Every field can be overridden from a TOML file by the host application;
//! selectors in particular are expected to drift as the sites change.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::SearchError;
use crate::sources::CompiledSelectors;
use crate::types::MemeSource;

/// Maximum number of memes returned by a search.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Configuration for a meme search.
///
/// Use [`Default::default()`] for the stock Reddit + Imgur setup, or
/// construct with field overrides for custom behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of memes to return after filtering and shuffling.
    pub max_results: usize,
    /// Per-source request timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, one is picked from a built-in
    /// list of realistic browser User-Agents when the client is built.
    pub user_agent: Option<String>,
    /// Value of the `Accept-Language` header sent to every source.
    pub accept_language: String,
    /// Normalisation mode and optional on-disk resources.
    pub normalize: NormalizeConfig,
    /// Sources to scrape, in registration order. Fetched concurrently;
    /// candidates are concatenated in this order before shuffling.
    pub sources: Vec<SourceConfig>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            timeout_seconds: 8,
            user_agent: None,
            accept_language: "en-US,en;q=0.9".to_owned(),
            normalize: NormalizeConfig::default(),
            sources: MemeSource::all()
                .iter()
                .map(|s| SourceConfig::default_for(*s))
                .collect(),
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `max_results` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    /// - `sources` must not be empty
    /// - every source URL must be an absolute `http(s)` URL
    /// - every source selector must be valid CSS
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_results == 0 {
            return Err(SearchError::Config(
                "max_results must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.sources.is_empty() {
            return Err(SearchError::Config(
                "at least one source must be configured".into(),
            ));
        }
        for source in &self.sources {
            source.validate()?;
        }
        Ok(())
    }
}

/// Where and how to scrape one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Which parser handles this source's markup.
    pub source: MemeSource,
    /// Listing page fetched with a single GET.
    pub url: String,
    /// CSS selectors locating posts and their fields.
    pub selectors: Selectors,
}

impl SourceConfig {
    /// The stock configuration for `source`.
    pub fn default_for(source: MemeSource) -> Self {
        match source {
            MemeSource::Reddit => Self {
                source,
                url: "https://www.reddit.com/r/memes/top/".to_owned(),
                selectors: Selectors {
                    container: "div.Post".to_owned(),
                    image: "img.ImageBox-image".to_owned(),
                    title: Some("h3._eYtD2XCVieq6emjKBH3m".to_owned()),
                    // Generated class name; expect to override it.
                    score: Some("div._1rZYMD_4xY3gRcNHqg6bTQ".to_owned()),
                },
            },
            MemeSource::Imgur => Self {
                source,
                url: "https://imgur.com/r/memes".to_owned(),
                selectors: Selectors {
                    container: "div.post-image-container".to_owned(),
                    image: "img".to_owned(),
                    title: None,
                    score: None,
                },
            },
        }
    }

    /// Validates the URL and selectors of this source.
    pub fn validate(&self) -> Result<(), SearchError> {
        let parsed = Url::parse(&self.url).map_err(|e| {
            SearchError::Config(format!("{} url {:?} is invalid: {e}", self.source, self.url))
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SearchError::Config(format!(
                "{} url must use http or https",
                self.source
            )));
        }
        CompiledSelectors::compile(&self.selectors)
            .map_err(|e| SearchError::Config(format!("{}: {e}", self.source)))?;
        Ok(())
    }
}

/// CSS selectors for one source's post markup.
///
/// `image`, `title` and `score` are evaluated inside each element matched
/// by `container`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selectors {
    /// Matches one post.
    pub container: String,
    /// Matches the post image; its `src` attribute becomes the image URL.
    pub image: String,
    /// Matches the element whose text is the title. When `None`, sources
    /// that support it fall back to the image `alt` text.
    #[serde(default)]
    pub title: Option<String>,
    /// Matches the element whose text is the score.
    #[serde(default)]
    pub score: Option<String>,
}

/// How the normaliser reduces tokens to a comparable form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizeMode {
    /// Dictionary lemmatisation (`mice` → `mouse`).
    #[default]
    Lemmatize,
    /// Snowball English stemming (`jumping` → `jump`).
    Stem,
}

/// Normalisation mode and optional on-disk resources.
///
/// When a path is `None` the copy embedded in the crate is used.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    pub mode: NormalizeMode,
    /// Stopword list, one word per line.
    pub stopwords: Option<PathBuf>,
    /// Lemma dictionary, `inflected<TAB>lemma` or a bare base form per line.
    pub lemmas: Option<PathBuf>,
    /// WordNet `dict/` directory. Takes precedence over `lemmas`.
    pub wordnet: Option<PathBuf>,
}
