//! Text normalisation: free text → comparable content tokens.
//!
//! [`Normalizer::process`] lowercases, strips markup, digits and
//! punctuation, tokenises, drops English stopwords and reduces each token
//! to a base form, by dictionary lemmatisation (the default) or by Snowball
//! stemming. The same pipeline runs over queries and scraped titles so that
//! their tokens can be compared directly.
//!
//! Resources are loaded once when the [`Normalizer`] is built and shared
//! read-only afterwards; a missing or malformed resource is a startup
//! error, never a per-call one.

pub mod lemma;
pub mod stopwords;

pub use lemma::LemmaDictionary;
pub use stopwords::StopwordSet;

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

use crate::config::{NormalizeConfig, NormalizeMode};
use crate::error::SearchError;

/// How tokens are reduced to a comparable base form.
#[derive(Clone)]
enum Reducer {
    Lemmatize(LemmaDictionary),
    Stem(Arc<Stemmer>),
}

impl fmt::Debug for Reducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lemmatize(lemmas) => f
                .debug_struct("Lemmatize")
                .field("bases", &lemmas.len())
                .finish(),
            Self::Stem(_) => f.write_str("Stem(English)"),
        }
    }
}

/// Lowercases, cleans, tokenises, filters and lemmatises (or stems) text.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stopwords: StopwordSet,
    reducer: Reducer,
    markup: Regex,
    non_alpha: Regex,
    whitespace: Regex,
    word: Regex,
}

impl Normalizer {
    /// Build a normaliser from already loaded resources.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Resource`] if the internal patterns fail to compile.
    pub fn new(stopwords: StopwordSet, lemmas: LemmaDictionary) -> Result<Self, SearchError> {
        Self::with_reducer(stopwords, Reducer::Lemmatize(lemmas))
    }

    /// Build a normaliser that stems tokens with the Snowball English
    /// stemmer instead of lemmatising them.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Resource`] if the internal patterns fail to compile.
    pub fn stemming(stopwords: StopwordSet) -> Result<Self, SearchError> {
        let stemmer = Stemmer::create(Algorithm::English);
        Self::with_reducer(stopwords, Reducer::Stem(Arc::new(stemmer)))
    }

    fn with_reducer(stopwords: StopwordSet, reducer: Reducer) -> Result<Self, SearchError> {
        Ok(Self {
            stopwords,
            reducer,
            // No DOTALL: a tag broken across lines is left in place.
            markup: compile(r"<.*?>")?,
            non_alpha: compile(r"[^a-z\s]")?,
            whitespace: compile(r"\s+")?,
            word: compile(r"\b[a-z]+\b")?,
        })
    }

    /// A normaliser using the English resources embedded in the crate.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Resource`] if the embedded data is malformed.
    pub fn english() -> Result<Self, SearchError> {
        Self::new(StopwordSet::english()?, LemmaDictionary::english()?)
    }

    /// A normaliser reading both resources from disk.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Resource`] if either file cannot be read or parsed.
    pub fn from_files(stopwords: &Path, lemmas: &Path) -> Result<Self, SearchError> {
        Self::new(
            StopwordSet::parse(&read_resource(stopwords)?)?,
            LemmaDictionary::parse(&read_resource(lemmas)?)?,
        )
    }

    /// A normaliser in the configured mode, using configured resource paths
    /// where given and embedded data otherwise.
    ///
    /// In lemmatise mode a WordNet directory takes precedence over a lemma
    /// file. In stem mode no lemma resource is loaded.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Resource`] if a configured file cannot be read
    /// or any resource is malformed.
    pub fn from_config(config: &NormalizeConfig) -> Result<Self, SearchError> {
        let stopwords = match config.stopwords {
            Some(ref path) => StopwordSet::parse(&read_resource(path)?)?,
            None => StopwordSet::english()?,
        };
        tracing::debug!(
            mode = ?config.mode,
            stopwords = stopwords.len(),
            custom_stopwords = config.stopwords.is_some(),
            "normalisation resources loaded"
        );

        match config.mode {
            NormalizeMode::Stem => {
                if config.lemmas.is_some() || config.wordnet.is_some() {
                    tracing::warn!("stem mode ignores configured lemma resources");
                }
                Self::stemming(stopwords)
            }
            NormalizeMode::Lemmatize => {
                let lemmas = match (&config.wordnet, &config.lemmas) {
                    (Some(dir), _) => LemmaDictionary::from_wordnet_dir(dir)?,
                    (None, Some(path)) => LemmaDictionary::parse(&read_resource(path)?)?,
                    (None, None) => LemmaDictionary::english()?,
                };
                Self::new(stopwords, lemmas)
            }
        }
    }

    /// Which reduction this normaliser applies.
    pub fn mode(&self) -> NormalizeMode {
        match self.reducer {
            Reducer::Lemmatize(_) => NormalizeMode::Lemmatize,
            Reducer::Stem(_) => NormalizeMode::Stem,
        }
    }

    /// Normalise `text` into an ordered token sequence.
    ///
    /// Never fails; text with no content words yields an empty vector.
    pub fn process(&self, text: &str) -> Vec<String> {
        let cleaned = self.clean(text);
        self.word
            .find_iter(&cleaned)
            .map(|m| m.as_str())
            .filter(|token| !self.stopwords.contains(token))
            .map(|token| self.reduce(token))
            .collect()
    }

    /// [`process`](Self::process) collected into a set for overlap tests.
    pub fn token_set(&self, text: &str) -> HashSet<String> {
        self.process(text).into_iter().collect()
    }

    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Lemmatise or stem a single lowercase token.
    pub fn reduce(&self, token: &str) -> String {
        match self.reducer {
            Reducer::Lemmatize(ref lemmas) => lemmas.lemmatize(token).into_owned(),
            Reducer::Stem(ref stemmer) => stemmer.stem(token).into_owned(),
        }
    }

    /// Lowercase, strip tags, drop non-letters, collapse whitespace.
    fn clean(&self, text: &str) -> String {
        let lower = text.to_lowercase();
        let without_tags = self.markup.replace_all(&lower, "");
        let letters_only = self.non_alpha.replace_all(&without_tags, "");
        self.whitespace
            .replace_all(&letters_only, " ")
            .trim()
            .to_owned()
    }
}

fn compile(pattern: &str) -> Result<Regex, SearchError> {
    Regex::new(pattern)
        .map_err(|e| SearchError::Resource(format!("invalid pattern {pattern:?}: {e}")))
}

fn read_resource(path: &Path) -> Result<String, SearchError> {
    std::fs::read_to_string(path)
        .map_err(|e| SearchError::Resource(format!("cannot read {}: {e}", path.display())))
}
