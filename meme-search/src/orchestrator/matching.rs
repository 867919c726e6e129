//! Token-overlap filtering and randomised truncation.
//!
//! Relevance is binary: a meme matches if its normalised title shares at
//! least one token with the normalised query. Matches are then shuffled so
//! that repeated identical queries surface different memes.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::normalize::Normalizer;
use crate::types::Meme;

/// Returns `true` if any title token is in `query_tokens`.
pub fn matches_query(query_tokens: &HashSet<String>, title_tokens: &[String]) -> bool {
    title_tokens.iter().any(|token| query_tokens.contains(token))
}

/// Keep the candidates whose normalised title overlaps the query tokens.
///
/// Order of the surviving candidates is preserved.
pub fn filter_matches(
    candidates: Vec<Meme>,
    query_tokens: &HashSet<String>,
    normalizer: &Normalizer,
) -> Vec<Meme> {
    candidates
        .into_iter()
        .filter(|meme| matches_query(query_tokens, &normalizer.process(&meme.title)))
        .collect()
}

/// Uniformly shuffle `memes` and keep at most `max_results` of them.
pub fn shuffle_and_truncate<R: Rng + ?Sized>(
    mut memes: Vec<Meme>,
    max_results: usize,
    rng: &mut R,
) -> Vec<Meme> {
    memes.shuffle(rng);
    memes.truncate(max_results);
    memes
}
