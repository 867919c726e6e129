//! Core search orchestrator: concurrent source fan-out, filter, shuffle, truncate.
//!
//! Fetches all configured sources concurrently, concatenates their posts
//! in registration order, keeps the ones whose title shares a token with
//! the query, shuffles them, and truncates to the configured maximum.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http;
use crate::normalize::Normalizer;
use crate::source::SourceFetcher;
use crate::sources::Fetcher;
use crate::types::{Meme, MemeSource, ResultSet, SourceOutcome, SourceReport};

use super::matching::{filter_matches, shuffle_and_truncate};

/// A ready-to-use meme search: validated config, shared HTTP client,
/// bound source fetchers and a loaded [`Normalizer`].
///
/// Build one at startup and share it; every [`search`](Self::search) call
/// is independent and keeps no state between calls.
pub struct MemeSearch {
    config: SearchConfig,
    normalizer: Arc<Normalizer>,
    fetchers: Vec<Fetcher>,
    client: reqwest::Client,
}

impl MemeSearch {
    /// Validate `config`, build the HTTP client and bind one fetcher per source.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for invalid configuration or
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: SearchConfig, normalizer: Arc<Normalizer>) -> Result<Self, SearchError> {
        config.validate()?;
        let client = http::build_client(&config)?;
        let fetchers = config
            .sources
            .iter()
            .map(Fetcher::from_config)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            config,
            normalizer,
            fetchers,
            client,
        })
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Registered sources, in registration order.
    pub fn sources(&self) -> Vec<MemeSource> {
        self.fetchers.iter().map(SourceFetcher::source).collect()
    }

    /// Search for memes matching `query`.
    ///
    /// # Pipeline
    ///
    /// 1. Empty query (after trimming) → empty result, no fetch
    /// 2. Normalise the query; no content tokens → empty result, no fetch
    /// 3. Fetch every source concurrently, each bounded by the timeout
    /// 4. Log per-source failures at warn level; they contribute nothing
    /// 5. Keep memes whose normalised title overlaps the query tokens
    /// 6. Shuffle uniformly and truncate to `config.max_results`
    ///
    /// Never fails: unreachable sources are reported in
    /// [`ResultSet::sources`] instead.
    pub async fn search(&self, query: &str) -> ResultSet {
        // The thread-local rng is not `Send`; it is only touched after the
        // last await.
        match self.gather(query).await {
            Some(gathered) => self.finish(gathered, &mut rand::thread_rng()),
            None => ResultSet::empty(),
        }
    }

    /// [`search`](Self::search) with a caller-supplied random source.
    pub async fn search_with_rng<R: Rng + Send + ?Sized>(
        &self,
        query: &str,
        rng: &mut R,
    ) -> ResultSet {
        match self.gather(query).await {
            Some(gathered) => self.finish(gathered, rng),
            None => ResultSet::empty(),
        }
    }

    /// Steps 1–4: short-circuit checks and the concurrent fetch.
    ///
    /// `None` means the query cannot match anything and no source was contacted.
    async fn gather(&self, query: &str) -> Option<Gathered> {
        if query.trim().is_empty() {
            tracing::debug!("empty query, skipping fetch");
            return None;
        }
        tracing::trace!(query, "meme search");

        let query_tokens = self.normalizer.token_set(query);
        if query_tokens.is_empty() {
            tracing::debug!("query has no content tokens, skipping fetch");
            return None;
        }

        let (candidates, reports) = self.fetch_all().await;
        Some(Gathered {
            query_tokens,
            candidates,
            reports,
        })
    }

    /// Steps 5–6: filter, shuffle, truncate, and attach the source reports.
    fn finish<R: Rng + ?Sized>(&self, gathered: Gathered, rng: &mut R) -> ResultSet {
        let Gathered {
            query_tokens,
            candidates,
            reports,
        } = gathered;

        let total = candidates.len();
        let matched = filter_matches(candidates, &query_tokens, &self.normalizer);
        tracing::debug!(total, matched = matched.len(), "candidates filtered");

        let result = ResultSet {
            memes: shuffle_and_truncate(matched, self.config.max_results, rng),
            sources: reports,
        };
        if result.is_degraded() {
            tracing::warn!(sources = result.sources.len(), "every meme source failed");
        }
        result
    }

    /// Fetch every source concurrently and concatenate in registration order.
    async fn fetch_all(&self) -> (Vec<Meme>, Vec<SourceReport>) {
        let timeout_secs = self.config.timeout_seconds;
        let timeout = Duration::from_secs(timeout_secs);

        let futures = self.fetchers.iter().map(|fetcher| async move {
            let source = fetcher.source();
            let result = tokio::time::timeout(timeout, fetcher.fetch(&self.client))
                .await
                .unwrap_or_else(|_| {
                    Err(SearchError::Timeout(format!(
                        "{source} after {timeout_secs}s"
                    )))
                });
            (source, result)
        });

        let outcomes = futures::future::join_all(futures).await;

        let mut candidates = Vec::new();
        let mut reports = Vec::with_capacity(outcomes.len());

        for (source, outcome) in outcomes {
            match outcome {
                Ok(memes) => {
                    let count = memes.len();
                    tracing::debug!(%source, count, "source returned memes");
                    candidates.extend(memes);
                    reports.push(SourceReport {
                        source,
                        outcome: SourceOutcome::Ok { candidates: count },
                    });
                }
                Err(err) => {
                    tracing::warn!(source = %source, error = %err, "source fetch failed");
                    reports.push(SourceReport {
                        source,
                        outcome: SourceOutcome::Failed {
                            reason: err.to_string(),
                        },
                    });
                }
            }
        }

        (candidates, reports)
    }
}

/// Query tokens plus everything the sources returned for one search.
struct Gathered {
    query_tokens: HashSet<String>,
    candidates: Vec<Meme>,
    reports: Vec<SourceReport>,
}
