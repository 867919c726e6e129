//! End-to-end tests for the memefinder HTTP routes.
//!
//! Meme sources are stood in for by wiremock and the service is bound to an
//! ephemeral port, so every request stays on loopback.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use memefinder::server::{ServiceInfo, DEGRADED_MESSAGE};
use memefinder::{build_search, AppConfig, MemeServer, SearchResponse};
use meme_search::{MemeSource, SourceConfig, SourceOutcome};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REDDIT_PAGE: &str = r#"<html><body>
<div class="Post">
  <div class="_1rZYMD_4xY3gRcNHqg6bTQ">42</div>
  <h3 class="_eYtD2XCVieq6emjKBH3m">Cat stares at cucumber</h3>
  <img class="ImageBox-image" src="https://i.redd.it/cucumber.png">
</div>
<div class="Post">
  <div class="_1rZYMD_4xY3gRcNHqg6bTQ">7</div>
  <h3 class="_eYtD2XCVieq6emjKBH3m">Monday again</h3>
  <img class="ImageBox-image" src="https://i.redd.it/monday.png">
</div>
</body></html>"#;

const IMGUR_PAGE: &str = r#"<html><body>
<div class="post-image-container"><img src="//i.imgur.com/kitten.jpg" alt="Cats being cats"></div>
<div class="post-image-container"><img src="//i.imgur.com/graph.jpg" alt="Quarterly earnings"></div>
</body></html>"#;

fn config_for(sources: &MockServer) -> AppConfig {
    let mut reddit = SourceConfig::default_for(MemeSource::Reddit);
    reddit.url = format!("{}/reddit", sources.uri());
    let mut imgur = SourceConfig::default_for(MemeSource::Imgur);
    imgur.url = format!("{}/imgur", sources.uri());

    let mut config = AppConfig::default();
    config.server.port = 0;
    config.search.timeout_seconds = 5;
    config.search.sources = vec![reddit, imgur];
    config
}

async fn mount(server: &MockServer, at: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn start(config: &AppConfig) -> MemeServer {
    let search = build_search(config).expect("search builds");
    MemeServer::start(search, &config.server)
        .await
        .expect("server binds")
}

async fn get_search(server: &MemeServer, query: Option<&str>) -> SearchResponse {
    let client = reqwest::Client::new();
    let url = format!("http://{}/search", server.addr());
    let request = match query {
        Some(q) => client.get(url).query(&[("query", q)]),
        None => client.get(url),
    };
    let response = request.send().await.expect("request sent");
    assert_eq!(response.status(), 200);
    response.json().await.expect("json body")
}

#[tokio::test]
async fn search_returns_matches_from_every_source() {
    let sources = MockServer::start().await;
    mount(&sources, "/reddit", ResponseTemplate::new(200).set_body_string(REDDIT_PAGE)).await;
    mount(&sources, "/imgur", ResponseTemplate::new(200).set_body_string(IMGUR_PAGE)).await;

    let config = config_for(&sources);
    let server = start(&config).await;

    let body = get_search(&server, Some("cat")).await;
    assert_eq!(body.query, "cat");
    assert!(!body.degraded);
    assert!(body.error.is_none());
    assert_eq!(body.memes.len(), 2);

    let titles: Vec<_> = body.memes.iter().map(|m| m.title.as_str()).collect();
    assert!(titles.contains(&"Cat stares at cucumber"));
    assert!(titles.contains(&"Cats being cats"));

    let reddit = body
        .memes
        .iter()
        .find(|m| m.source == MemeSource::Reddit)
        .expect("reddit meme");
    assert_eq!(reddit.score, 42);

    assert_eq!(body.sources.len(), 2);
    assert!(body
        .sources
        .iter()
        .all(|r| r.outcome == SourceOutcome::Ok { candidates: 2 }));
}

#[tokio::test]
async fn missing_query_returns_empty_without_fetching() {
    let sources = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(REDDIT_PAGE))
        .expect(0)
        .mount(&sources)
        .await;

    let config = config_for(&sources);
    let server = start(&config).await;

    let body = get_search(&server, None).await;
    assert!(body.query.is_empty());
    assert!(body.memes.is_empty());
    assert!(!body.degraded);
    assert!(body.sources.is_empty());

    let body = get_search(&server, Some("   ")).await;
    assert!(body.memes.is_empty());
    assert!(!body.degraded);
}

#[tokio::test]
async fn all_sources_failing_reports_degraded() {
    let sources = MockServer::start().await;
    mount(&sources, "/reddit", ResponseTemplate::new(500)).await;
    mount(&sources, "/imgur", ResponseTemplate::new(503)).await;

    let config = config_for(&sources);
    let server = start(&config).await;

    let body = get_search(&server, Some("cat")).await;
    assert!(body.memes.is_empty());
    assert!(body.degraded);
    assert_eq!(body.error.as_deref(), Some(DEGRADED_MESSAGE));
    assert!(body.sources.iter().all(|r| r.is_failure()));
}

#[tokio::test]
async fn index_lists_configured_sources() {
    let sources = MockServer::start().await;
    let config = config_for(&sources);
    let server = start(&config).await;

    let info: ServiceInfo = reqwest::get(format!("http://{}/", server.addr()))
        .await
        .expect("request sent")
        .json()
        .await
        .expect("json body");

    assert_eq!(info.name, "memefinder");
    assert_eq!(info.sources, vec![MemeSource::Reddit, MemeSource::Imgur]);
}
