//! Core types for scraped memes, source identification, and search results.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single meme post scraped from a source.
///
/// Created by a source parser from one HTML container and never mutated
/// afterwards. Lives only for the duration of one search call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meme {
    /// Which source the post was scraped from.
    pub source: MemeSource,
    /// Absolute image URL. Empty when the image element had no `src`.
    pub image_url: String,
    /// Post title. May be empty.
    pub title: String,
    /// Upvote-like score, 0 for sources without one or when unparseable.
    pub score: i64,
}

/// The closed set of sources memes can be scraped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemeSource {
    /// Forum-style listing with titles and upvote counts.
    Reddit,
    /// Gallery-style grid where the title lives in the image `alt` text.
    Imgur,
}

impl MemeSource {
    /// Returns the human-readable name of this source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Reddit => "Reddit",
            Self::Imgur => "Imgur",
        }
    }

    /// Returns all available source variants.
    pub fn all() -> &'static [MemeSource] {
        &[Self::Reddit, Self::Imgur]
    }
}

impl fmt::Display for MemeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a single source fared during one search call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SourceOutcome {
    /// The source was fetched and parsed; `candidates` posts were extracted
    /// before relevance filtering.
    Ok { candidates: usize },
    /// The source failed as a whole and contributed no candidates.
    Failed { reason: String },
}

/// Per-source diagnostic attached to every [`ResultSet`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceReport {
    /// The source this report describes.
    pub source: MemeSource,
    /// What happened when it was fetched.
    #[serde(flatten)]
    pub outcome: SourceOutcome,
}

impl SourceReport {
    /// Returns `true` if the source failed as a whole.
    pub fn is_failure(&self) -> bool {
        matches!(self.outcome, SourceOutcome::Failed { .. })
    }
}

/// The memes returned for one query, plus what happened at each source.
///
/// An empty `memes` list is a normal outcome. Callers that need to tell
/// "nothing matched" apart from "the sources were unreachable" should
/// check [`ResultSet::is_degraded`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    /// Matching memes in random order.
    pub memes: Vec<Meme>,
    /// One report per registered source, in registration order.
    /// Empty when the search short-circuited without fetching.
    pub sources: Vec<SourceReport>,
}

impl ResultSet {
    /// A result set for a search that never reached any source.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of matching memes.
    pub fn len(&self) -> usize {
        self.memes.len()
    }

    /// Returns `true` if no memes matched.
    pub fn is_empty(&self) -> bool {
        self.memes.is_empty()
    }

    /// Returns `true` if sources were fetched and every one of them failed.
    pub fn is_degraded(&self) -> bool {
        !self.sources.is_empty() && self.sources.iter().all(SourceReport::is_failure)
    }

    /// Sources that failed during this search.
    pub fn failed_sources(&self) -> Vec<MemeSource> {
        self.sources
            .iter()
            .filter(|r| r.is_failure())
            .map(|r| r.source)
            .collect()
    }

    /// Sources that were fetched successfully during this search.
    pub fn succeeded_sources(&self) -> Vec<MemeSource> {
        self.sources
            .iter()
            .filter(|r| !r.is_failure())
            .map(|r| r.source)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(source: MemeSource, outcome: SourceOutcome) -> SourceReport {
        SourceReport { source, outcome }
    }

    #[test]
    fn meme_source_display() {
        assert_eq!(MemeSource::Reddit.to_string(), "Reddit");
        assert_eq!(MemeSource::Imgur.to_string(), "Imgur");
    }

    #[test]
    fn meme_source_all() {
        let all = MemeSource::all();
        assert_eq!(all.len(), 2);
        assert!(all.contains(&MemeSource::Reddit));
        assert!(all.contains(&MemeSource::Imgur));
    }

    #[test]
    fn meme_serializes_with_snake_case_fields() {
        let meme = Meme {
            source: MemeSource::Imgur,
            image_url: "https://i.imgur.com/abc.jpg".into(),
            title: "Cat".into(),
            score: 0,
        };
        let json = serde_json::to_value(&meme).expect("serialize");
        assert_eq!(json["source"], "Imgur");
        assert_eq!(json["image_url"], "https://i.imgur.com/abc.jpg");
        assert_eq!(json["score"], 0);
    }

    #[test]
    fn source_report_serializes_flat() {
        let ok = report(MemeSource::Reddit, SourceOutcome::Ok { candidates: 3 });
        let json = serde_json::to_value(&ok).expect("serialize");
        assert_eq!(json["source"], "Reddit");
        assert_eq!(json["status"], "ok");
        assert_eq!(json["candidates"], 3);

        let failed = report(
            MemeSource::Imgur,
            SourceOutcome::Failed {
                reason: "HTTP error: 503".into(),
            },
        );
        let json = serde_json::to_value(&failed).expect("serialize");
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"], "HTTP error: 503");
    }

    #[test]
    fn empty_result_set_is_not_degraded() {
        let set = ResultSet::empty();
        assert!(set.is_empty());
        assert!(!set.is_degraded());
    }

    #[test]
    fn all_failed_is_degraded() {
        let set = ResultSet {
            memes: vec![],
            sources: vec![
                report(MemeSource::Reddit, SourceOutcome::Failed { reason: "x".into() }),
                report(MemeSource::Imgur, SourceOutcome::Failed { reason: "y".into() }),
            ],
        };
        assert!(set.is_degraded());
        assert_eq!(
            set.failed_sources(),
            vec![MemeSource::Reddit, MemeSource::Imgur]
        );
        assert!(set.succeeded_sources().is_empty());
    }

    #[test]
    fn partial_failure_is_not_degraded() {
        let set = ResultSet {
            memes: vec![],
            sources: vec![
                report(MemeSource::Reddit, SourceOutcome::Failed { reason: "x".into() }),
                report(MemeSource::Imgur, SourceOutcome::Ok { candidates: 0 }),
            ],
        };
        assert!(!set.is_degraded());
        assert_eq!(set.failed_sources(), vec![MemeSource::Reddit]);
        assert_eq!(set.succeeded_sources(), vec![MemeSource::Imgur]);
    }
}
