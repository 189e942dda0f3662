// src/ingest/providers/bing.rs
use url::Url;

use crate::ingest::types::FeedFetcher;
use crate::ingest::{fetch_source, Collector, LinkKey, PublisherRule};
use crate::publisher::BING_PUBLISHER;

pub const BING_NEWS_RSS: &str = "https://www.bing.com/news/search";

pub fn search_url(query: &str) -> String {
    format!(
        "{BING_NEWS_RSS}?q={}&format=rss&mkt=pt-BR",
        urlencoding::encode(query)
    )
}

/// Dedupe key for Bing links: scheme + host + path, query and fragment dropped.
/// Unparseable links are cut at the first `?` or `#`.
pub fn normalize_link(link: &str) -> String {
    let link = link.trim();
    match Url::parse(link) {
        Ok(u) => format!("{}://{}{}", u.scheme(), u.host_str().unwrap_or_default(), u.path()),
        Err(_) => link
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}

/// One Bing News search per topic query. Every entry is attributed to Bing News
/// and the allowlist is skipped.
pub async fn collect(fetcher: &dyn FeedFetcher, collector: &mut Collector<'_>) {
    for query in &collector.topic().queries {
        let url = search_url(query);
        if let Some(feed) = fetch_source(fetcher, &url, collector).await {
            collector.ingest(&feed, PublisherRule::Fixed(BING_PUBLISHER), LinkKey::Normalized);
        }
    }
}
