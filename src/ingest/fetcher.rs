// src/ingest/fetcher.rs
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;

use crate::ingest::parse::parse_feed;
use crate::ingest::types::{FeedFetcher, ParsedFeed};

/// Fetches feeds over HTTP. No retries and no explicit timeout: a slow upstream
/// only delays the request that asked for it.
#[derive(Clone)]
pub struct HttpFeedFetcher {
    client: reqwest::Client,
}

impl HttpFeedFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("building feed http client")?;
        Ok(Self { client })
    }

    /// Uses $NEWS_USER_AGENT when set.
    pub fn from_env() -> Result<Self> {
        Self::new(&crate::config::user_agent())
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<ParsedFeed> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .context("feed http get()")?
            .error_for_status()
            .context("feed http status")?;
        let body = resp.text().await.context("feed http .text()")?;
        parse_feed(&body)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Serves feeds from in-memory XML keyed by URL. Unknown URLs fail like a dead upstream.
#[derive(Debug, Clone, Default)]
pub struct FixtureFetcher {
    feeds: HashMap<String, String>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_feed(mut self, url: impl Into<String>, xml: impl Into<String>) -> Self {
        self.feeds.insert(url.into(), xml.into());
        self
    }
}

#[async_trait]
impl FeedFetcher for FixtureFetcher {
    async fn fetch(&self, url: &str) -> Result<ParsedFeed> {
        let xml = self
            .feeds
            .get(url)
            .ok_or_else(|| anyhow!("no fixture for {url}"))?;
        parse_feed(xml)
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}
