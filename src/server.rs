//! HTTP front end for meme search.
//!
//! ## Endpoints
//!
//! - `GET /`: service name, version and registered sources
//! - `GET /search?query=…`: matching memes plus per-source diagnostics
//!
//! A missing or blank `query` is answered with an empty result, not an error.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use meme_search::{Meme, MemeSearch, MemeSource, ResultSet, SourceReport};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing::info;

use crate::config::ServerConfig;
use crate::error::{AppError, Result};

/// Message returned alongside results when every source failed.
pub const DEGRADED_MESSAGE: &str = "An error occurred during search";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Query string of `GET /search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

/// Body of `GET /search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The query as received.
    pub query: String,
    /// Matching memes in random order.
    pub memes: Vec<Meme>,
    /// `true` when every source failed, so an empty list means "unavailable"
    /// rather than "no matches".
    pub degraded: bool,
    /// Human-readable message, present only when `degraded`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// One entry per source contacted.
    pub sources: Vec<SourceReport>,
}

impl SearchResponse {
    pub fn new(query: String, result: ResultSet) -> Self {
        let degraded = result.is_degraded();
        Self {
            query,
            degraded,
            error: degraded.then(|| DEGRADED_MESSAGE.to_owned()),
            memes: result.memes,
            sources: result.sources,
        }
    }
}

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub sources: Vec<MemeSource>,
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

/// Shared state for axum handlers.
#[derive(Clone)]
struct AppState {
    search: Arc<MemeSearch>,
}

/// Build the router without binding a socket.
pub fn router(search: Arc<MemeSearch>) -> Router {
    Router::new()
        .route("/", get(handle_index))
        .route("/search", get(handle_search))
        .with_state(AppState { search })
}

/// A running meme search HTTP server.
pub struct MemeServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl MemeServer {
    /// Bind to `{config.host}:{config.port}` (port `0` auto-assigns) and
    /// serve in a background tokio task.
    ///
    /// # Errors
    ///
    /// Returns an error if the TCP listener cannot bind.
    pub async fn start(search: Arc<MemeSearch>, config: &ServerConfig) -> Result<Self> {
        let app = router(search);

        let bind_addr = format!("{}:{}", config.host, config.port);
        let listener = TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| AppError::Server(format!("bind to {bind_addr} failed: {e}")))?;

        let addr = listener
            .local_addr()
            .map_err(|e| AppError::Server(format!("failed to get local addr: {e}")))?;

        info!("memefinder listening on http://{addr}");

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("memefinder server error: {e}");
            }
        });

        Ok(Self { addr, handle })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Wait for the server task to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the server task panicked or was aborted.
    pub async fn wait(&mut self) -> Result<()> {
        (&mut self.handle)
            .await
            .map_err(|e| AppError::Server(format!("server task failed: {e}")))
    }

    /// Abort the server task.
    pub fn shutdown(&self) {
        self.handle.abort();
    }
}

impl Drop for MemeServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn handle_index(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: env!("CARGO_PKG_NAME").to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        sources: state.search.sources(),
    })
}

async fn handle_search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchResponse> {
    let result = state.search.search(&params.query).await;
    tracing::debug!(
        count = result.len(),
        degraded = result.is_degraded(),
        "search served"
    );
    Json(SearchResponse::new(params.query, result))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;
    use meme_search::SourceOutcome;

    fn failed(source: MemeSource) -> SourceReport {
        SourceReport {
            source,
            outcome: SourceOutcome::Failed {
                reason: "HTTP error: 503".into(),
            },
        }
    }

    #[test]
    fn degraded_response_carries_message() {
        let result = ResultSet {
            memes: vec![],
            sources: vec![failed(MemeSource::Reddit), failed(MemeSource::Imgur)],
        };
        let response = SearchResponse::new("cat".into(), result);
        assert!(response.degraded);
        assert_eq!(response.error.as_deref(), Some(DEGRADED_MESSAGE));
    }

    #[test]
    fn normal_empty_response_has_no_error() {
        let response = SearchResponse::new(String::new(), ResultSet::empty());
        assert!(!response.degraded);
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("error").is_none());
        assert_eq!(json["memes"], serde_json::json!([]));
    }

    #[test]
    fn search_params_default_to_empty_query() {
        let params: SearchParams = serde_json::from_str("{}").unwrap();
        assert!(params.query.is_empty());
    }
}
