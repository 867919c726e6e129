//! Imgur: gallery-style grid of meme images.
//!
//! Gallery tiles have no separate heading; the title is the image's `alt`
//! text. Only the image is required. Imgur exposes no score.

use scraper::Html;
use url::Url;

use super::{element_text, parse_base_url, resolve_image_url, CompiledSelectors};
use crate::config::SourceConfig;
use crate::error::SearchError;
use crate::http;
use crate::source::SourceFetcher;
use crate::types::{Meme, MemeSource};

/// Title used when a tile has neither a title element nor `alt` text.
pub const UNTITLED: &str = "No Title";

/// Imgur gallery scraper.
pub struct ImgurSource {
    url: String,
    base: Url,
    selectors: CompiledSelectors,
}

impl ImgurSource {
    /// Bind a scraper to the URL and selectors in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError`] if the URL or a selector is invalid.
    pub fn new(config: &SourceConfig) -> Result<Self, SearchError> {
        Ok(Self {
            url: config.url.clone(),
            base: parse_base_url(config)?,
            selectors: CompiledSelectors::compile(&config.selectors)?,
        })
    }
}

impl SourceFetcher for ImgurSource {
    async fn fetch(&self, client: &reqwest::Client) -> Result<Vec<Meme>, SearchError> {
        let html = http::fetch_html(client, MemeSource::Imgur.name(), &self.url).await?;
        Ok(parse_imgur_html(&html, &self.selectors, &self.base))
    }

    fn source(&self) -> MemeSource {
        MemeSource::Imgur
    }
}

/// Parse an Imgur gallery page into memes.
///
/// A configured title selector wins over the `alt` text when it matches.
pub(crate) fn parse_imgur_html(html: &str, selectors: &CompiledSelectors, base: &Url) -> Vec<Meme> {
    let document = Html::parse_document(html);
    let mut memes = Vec::new();

    for (index, tile) in document.select(&selectors.container).enumerate() {
        let Some(img) = tile.select(&selectors.image).next() else {
            tracing::debug!(index, "Imgur tile without image skipped");
            continue;
        };

        let title = selectors
            .title
            .as_ref()
            .and_then(|sel| tile.select(sel).next())
            .map(element_text)
            .or_else(|| img.value().attr("alt").map(|alt| alt.trim().to_owned()))
            .unwrap_or_else(|| UNTITLED.to_owned());

        memes.push(Meme {
            source: MemeSource::Imgur,
            image_url: img
                .value()
                .attr("src")
                .map(|src| resolve_image_url(base, src))
                .unwrap_or_default(),
            title,
            score: 0,
        });
    }

    tracing::debug!(count = memes.len(), "Imgur tiles parsed");
    memes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Selectors;

    fn default_parts() -> (CompiledSelectors, Url) {
        let config = SourceConfig::default_for(MemeSource::Imgur);
        let selectors = CompiledSelectors::compile(&config.selectors).expect("selectors");
        let base = Url::parse(&config.url).expect("url");
        (selectors, base)
    }

    #[test]
    fn title_comes_from_alt_text() {
        let (selectors, base) = default_parts();
        let html = r#"<div class="post-image-container"><img src="//i.imgur.com/a.jpg" alt=" Grumpy cat "></div>"#;
        let memes = parse_imgur_html(html, &selectors, &base);
        assert_eq!(memes.len(), 1);
        assert_eq!(memes[0].title, "Grumpy cat");
        assert_eq!(memes[0].image_url, "https://i.imgur.com/a.jpg");
        assert_eq!(memes[0].score, 0);
        assert_eq!(memes[0].source, MemeSource::Imgur);
    }

    #[test]
    fn missing_alt_defaults_to_untitled() {
        let (selectors, base) = default_parts();
        let html = r#"<div class="post-image-container"><img src="https://i.imgur.com/b.jpg"></div>"#;
        let memes = parse_imgur_html(html, &selectors, &base);
        assert_eq!(memes[0].title, UNTITLED);
    }

    #[test]
    fn tile_without_image_skipped() {
        let (selectors, base) = default_parts();
        let html = r#"
<div class="post-image-container"><img src="https://i.imgur.com/c.jpg" alt="kept"></div>
<div class="post-image-container"><video src="https://i.imgur.com/d.mp4"></video></div>"#;
        let memes = parse_imgur_html(html, &selectors, &base);
        assert_eq!(memes.len(), 1);
        assert_eq!(memes[0].title, "kept");
    }

    #[test]
    fn configured_title_selector_wins() {
        let config = SourceConfig {
            selectors: Selectors {
                title: Some("p.caption".into()),
                ..SourceConfig::default_for(MemeSource::Imgur).selectors
            },
            ..SourceConfig::default_for(MemeSource::Imgur)
        };
        let selectors = CompiledSelectors::compile(&config.selectors).expect("selectors");
        let base = Url::parse(&config.url).expect("url");
        let html = r#"
<div class="post-image-container"><img src="/e.jpg" alt="alt text"><p class="caption">Caption text</p></div>
<div class="post-image-container"><img src="/f.jpg" alt="fallback alt"></div>"#;
        let memes = parse_imgur_html(html, &selectors, &base);
        assert_eq!(memes[0].title, "Caption text");
        assert_eq!(memes[1].title, "fallback alt");
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ImgurSource>();
    }

    // ── Fixture-based parser tests ──────────────────────────────────────

    const FIXTURE_IMGUR_HTML: &str = include_str!("../../test-data/imgur.html");

    #[test]
    fn fixture_extracts_all_image_tiles() {
        let (selectors, base) = default_parts();
        let memes = parse_imgur_html(FIXTURE_IMGUR_HTML, &selectors, &base);
        // Fixture has 4 tiles; one is a video-only tile.
        assert_eq!(memes.len(), 3);
        for m in &memes {
            assert!(m.image_url.starts_with("https://i.imgur.com/"), "{}", m.image_url);
        }
        assert_eq!(memes[2].title, UNTITLED);
    }

    #[tokio::test]
    #[ignore] // Live test: run with `cargo test -- --ignored`
    async fn live_imgur_fetch() {
        let config = crate::config::SearchConfig::default();
        let client = http::build_client(&config).expect("client");
        let source =
            ImgurSource::new(&SourceConfig::default_for(MemeSource::Imgur)).expect("source");
        let _ = source.fetch(&client).await;
    }
}
