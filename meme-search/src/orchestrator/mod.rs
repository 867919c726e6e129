//! Search orchestrator: concurrent source fetches, token matching, shuffling.
//!
//! This module fans a query out to every configured source concurrently,
//! keeps the posts whose normalised title shares a token with the
//! normalised query, and returns a shuffled, truncated result set.

pub mod matching;
pub mod search;

pub use search::MemeSearch;
