// src/ingest/mod.rs
pub mod fetcher;
pub mod parse;
pub mod providers;
pub mod types;

use crate::config::topics::TopicConfig;
use crate::ingest::providers::{bing, google_news, rss_direct};
use crate::ingest::types::{FeedEntry, FeedFetcher, Method, ParsedFeed};
use crate::publisher::{is_allowed_publisher, publisher_from_title};
use crate::relevance::{relevance_score, scoring_text};
use crate::response::ResultItem;
use crate::window::{TimeWindow, DATE_FORMAT};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;
use std::collections::HashSet;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "news_sources_fetched_total",
            "Feeds/search queries fetched and parsed."
        );
        describe_counter!(
            "news_source_errors_total",
            "Feed fetch/parse errors (source contributes nothing)."
        );
        describe_counter!("news_entries_total", "Entries seen across all sources.");
        describe_counter!("news_kept_total", "Entries that made it into a response.");
        describe_counter!("news_skipped_total", "Entries dropped, labelled by reason.");
        describe_histogram!("news_fetch_ms", "Fetch + parse time per source in milliseconds.");
        describe_histogram!("news_parse_ms", "Feed parse time in milliseconds.");
    });
}

/// Why an entry did not make it into the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    NoDate,
    OutOfWindow,
    Publisher,
    NoLink,
    Duplicate,
    LowRelevance,
}

impl Skip {
    pub fn as_str(&self) -> &'static str {
        match self {
            Skip::NoDate => "no_date",
            Skip::OutOfWindow => "out_of_window",
            Skip::Publisher => "publisher",
            Skip::NoLink => "no_link",
            Skip::Duplicate => "duplicate",
            Skip::LowRelevance => "low_relevance",
        }
    }
}

/// How the publisher of an entry is determined.
#[derive(Debug, Clone, Copy)]
pub enum PublisherRule<'f> {
    /// Suffix after the last " - " of the title, allowlist-checked.
    TitleSuffix,
    /// The feed's own title, allowlist-checked.
    FeedTitle(Option<&'f str>),
    /// Fixed name, allowlist not consulted.
    Fixed(&'static str),
}

/// What identifies an entry for deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKey {
    Exact,
    /// scheme + host + path
    Normalized,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub sources: usize,
    pub source_errors: usize,
    pub entries: usize,
    pub kept: usize,
    pub no_date: usize,
    pub out_of_window: usize,
    pub publisher: usize,
    pub no_link: usize,
    pub duplicate: usize,
    pub low_relevance: usize,
}

impl IngestStats {
    fn record_skip(&mut self, skip: Skip) {
        let slot = match skip {
            Skip::NoDate => &mut self.no_date,
            Skip::OutOfWindow => &mut self.out_of_window,
            Skip::Publisher => &mut self.publisher,
            Skip::NoLink => &mut self.no_link,
            Skip::Duplicate => &mut self.duplicate,
            Skip::LowRelevance => &mut self.low_relevance,
        };
        *slot += 1;
    }
}

/// Per-run filter state: the dedupe set and the accepted items.
pub struct Collector<'a> {
    topic: &'a TopicConfig,
    window: &'a TimeWindow,
    seen: HashSet<String>,
    items: Vec<ResultItem>,
    stats: IngestStats,
}

impl<'a> Collector<'a> {
    pub fn new(topic: &'a TopicConfig, window: &'a TimeWindow) -> Self {
        Self {
            topic,
            window,
            seen: HashSet::new(),
            items: Vec::new(),
            stats: IngestStats::default(),
        }
    }

    pub fn topic(&self) -> &'a TopicConfig {
        self.topic
    }

    /// Run one entry through the filter chain. On success the item is appended.
    pub fn offer(
        &mut self,
        entry: &FeedEntry,
        rule: PublisherRule<'_>,
        key: LinkKey,
    ) -> Result<(), Skip> {
        let published = entry.published.ok_or(Skip::NoDate)?;
        let local = self.window.localize(published);
        if !self.window.contains(&local) {
            return Err(Skip::OutOfWindow);
        }

        let source = match rule {
            PublisherRule::TitleSuffix => publisher_from_title(&entry.title),
            PublisherRule::FeedTitle(title) => title.unwrap_or_default().trim().to_string(),
            PublisherRule::Fixed(name) => name.to_string(),
        };
        let checked = !matches!(rule, PublisherRule::Fixed(_));
        if checked && !is_allowed_publisher(&source, &self.topic.publishers) {
            return Err(Skip::Publisher);
        }

        let link = entry
            .link
            .as_deref()
            .filter(|l| !l.trim().is_empty())
            .ok_or(Skip::NoLink)?;
        let dedupe_key = match key {
            LinkKey::Exact => link.to_string(),
            LinkKey::Normalized => bing::normalize_link(link),
        };
        if self.seen.contains(&dedupe_key) {
            return Err(Skip::Duplicate);
        }

        let text = scoring_text(&entry.title, entry.summary.as_deref());
        let relevance = relevance_score(&text, &self.topic.keywords);
        if relevance < self.topic.min_relevance {
            return Err(Skip::LowRelevance);
        }

        self.seen.insert(dedupe_key);
        self.items.push(ResultItem {
            title: entry.title.clone(),
            link: link.to_string(),
            date: local.format(DATE_FORMAT).to_string(),
            source,
            relevance,
            published_at: local,
        });
        Ok(())
    }

    /// Offer every entry of a fetched feed.
    pub fn ingest(&mut self, feed: &ParsedFeed, rule: PublisherRule<'_>, key: LinkKey) {
        self.stats.sources += 1;
        counter!("news_sources_fetched_total").increment(1);
        counter!("news_entries_total").increment(feed.entries.len() as u64);

        for entry in &feed.entries {
            self.stats.entries += 1;
            match self.offer(entry, rule, key) {
                Ok(()) => {
                    self.stats.kept += 1;
                    counter!("news_kept_total").increment(1);
                }
                Err(skip) => {
                    self.stats.record_skip(skip);
                    counter!("news_skipped_total", "reason" => skip.as_str()).increment(1);
                }
            }
        }
    }

    /// Record a source that could not be fetched or parsed.
    pub fn source_failed(&mut self) {
        self.stats.source_errors += 1;
        counter!("news_source_errors_total").increment(1);
    }

    pub fn finish(self) -> (Vec<ResultItem>, IngestStats) {
        let mut items = self.items;
        rank_items(&mut items);
        (items, self.stats)
    }
}

/// Relevance first, then newest publication instant. Stable for exact ties.
pub fn rank_items(items: &mut [ResultItem]) {
    items.sort_by(|a, b| {
        b.relevance
            .cmp(&a.relevance)
            .then_with(|| b.published_at.cmp(&a.published_at))
    });
}

/// Fetch one source. Failures are logged and counted, never propagated.
pub(crate) async fn fetch_source(
    fetcher: &dyn FeedFetcher,
    url: &str,
    collector: &mut Collector<'_>,
) -> Option<ParsedFeed> {
    let t0 = std::time::Instant::now();
    let res = fetcher.fetch(url).await;
    histogram!("news_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

    match res {
        Ok(feed) => {
            tracing::debug!(
                target: "ingest",
                fetcher = fetcher.name(),
                url,
                entries = feed.entries.len(),
                "source fetched"
            );
            Some(feed)
        }
        Err(e) => {
            tracing::warn!(error = ?e, fetcher = fetcher.name(), url, "source error");
            collector.source_failed();
            None
        }
    }
}

/// Run the whole pipeline for one topic with one method. Sources are fetched one
/// after another; the result is ranked.
pub async fn run(
    fetcher: &dyn FeedFetcher,
    topic: &TopicConfig,
    method: Method,
    window: &TimeWindow,
) -> (Vec<ResultItem>, IngestStats) {
    ensure_metrics_described();

    let mut collector = Collector::new(topic, window);
    match method {
        Method::Google => google_news::collect(fetcher, &mut collector).await,
        Method::Rss => rss_direct::collect(fetcher, &mut collector).await,
        Method::Bing => bing::collect(fetcher, &mut collector).await,
    }
    let (items, stats) = collector.finish();

    tracing::info!(
        target: "ingest",
        topic = %topic.slug,
        method = method.as_str(),
        sources = stats.sources,
        source_errors = stats.source_errors,
        entries = stats.entries,
        kept = stats.kept,
        duplicate = stats.duplicate,
        "ingest run"
    );

    (items, stats)
}
