//! Keyword News Aggregator — Binary Entrypoint
//! Boots the Axum HTTP server, wiring topics, the feed fetcher, metrics and middleware.

use std::sync::Arc;

use keyword_news_aggregator::{
    api::{self, AppState},
    config::topics::load_topics_default,
    ingest::fetcher::HttpFeedFetcher,
    metrics::Metrics,
};
use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - NEWS_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("NEWS_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("keyword_news_aggregator=info,ingest=info,warn"));

    // Shuttle may already have installed a subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let topics = load_topics_default()?;
    tracing::info!(topics = topics.len(), "topics loaded");

    let metrics = Metrics::init(topics.len())?;
    let fetcher = HttpFeedFetcher::from_env()?;

    let state = AppState::new(topics, Arc::new(fetcher));
    let router = api::router(state).merge(metrics.router());

    Ok(router.into())
}
