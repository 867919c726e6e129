//! memefinder service binary.
//!
//! Loads configuration, builds the meme search (failing fast if the
//! normalisation resources cannot be loaded), and serves `/search` until
//! interrupted. Tracing goes to stderr; set `RUST_LOG` to adjust.

use memefinder::{build_search, AppConfig, MemeServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("memefinder starting");

    let config = AppConfig::load().map_err(|e| {
        tracing::error!(error = %e, "failed to load config");
        anyhow::anyhow!("memefinder config failed: {e}")
    })?;

    let search = build_search(&config).map_err(|e| {
        tracing::error!(error = %e, "failed to initialise search");
        anyhow::anyhow!("memefinder startup failed: {e}")
    })?;

    let mut server = MemeServer::start(search, &config.server).await?;

    tokio::select! {
        result = server.wait() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupt received, shutting down");
            server.shutdown();
        }
    }

    tracing::info!("memefinder shut down cleanly");
    Ok(())
}
