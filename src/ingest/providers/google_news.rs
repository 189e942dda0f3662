// src/ingest/providers/google_news.rs
use crate::ingest::types::FeedFetcher;
use crate::ingest::{fetch_source, Collector, LinkKey, PublisherRule};

pub const GOOGLE_NEWS_RSS: &str = "https://news.google.com/rss/search";

/// Google News RSS search URL, Brazilian Portuguese edition.
pub fn search_url(query: &str) -> String {
    format!(
        "{GOOGLE_NEWS_RSS}?q={}&hl=pt-BR&gl=BR&ceid=BR:pt-419",
        urlencoding::encode(query)
    )
}

/// One search per topic query. Publisher comes from the headline suffix.
pub async fn collect(fetcher: &dyn FeedFetcher, collector: &mut Collector<'_>) {
    for query in &collector.topic().queries {
        let url = search_url(query);
        if let Some(feed) = fetch_source(fetcher, &url, collector).await {
            collector.ingest(&feed, PublisherRule::TitleSuffix, LinkKey::Exact);
        }
    }
}
