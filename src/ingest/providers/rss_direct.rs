// src/ingest/providers/rss_direct.rs
use crate::ingest::types::FeedFetcher;
use crate::ingest::{fetch_source, Collector, LinkKey, PublisherRule};

/// Reads the topic's publisher feeds directly. The feed's own title is the
/// publisher, still subject to the allowlist.
pub async fn collect(fetcher: &dyn FeedFetcher, collector: &mut Collector<'_>) {
    for url in &collector.topic().feeds {
        if let Some(feed) = fetch_source(fetcher, url, collector).await {
            let rule = PublisherRule::FeedTitle(feed.title.as_deref());
            collector.ingest(&feed, rule, LinkKey::Exact);
        }
    }
}
