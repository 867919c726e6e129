//! English stopword list.

use std::collections::HashSet;

use crate::error::SearchError;

/// The stopword list compiled into the crate.
pub const EMBEDDED_STOPWORDS: &str = include_str!("../../data/stopwords_en.txt");

/// A set of lowercase words excluded from matching.
#[derive(Debug, Clone)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Parse a stopword list: one word per line, `#` comments and blank
    /// lines ignored. Words are lowercased.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Resource`] if the list contains no words.
    pub fn parse(text: &str) -> Result<Self, SearchError> {
        let words: HashSet<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_lowercase)
            .collect();

        if words.is_empty() {
            return Err(SearchError::Resource("stopword list is empty".into()));
        }
        Ok(Self { words })
    }

    /// The built-in English list.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded list is broken.
    pub fn english() -> Result<Self, SearchError> {
        Self::parse(EMBEDDED_STOPWORDS)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
