// src/ingest/types.rs
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One feed entry. Every field a feed may omit is explicit here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: String, // empty when the feed has none
    pub summary: Option<String>,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
}

/// A fetched + parsed feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFeed {
    /// Channel title (RSS) or feed title (Atom).
    pub title: Option<String>,
    pub entries: Vec<FeedEntry>,
}

#[async_trait::async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<ParsedFeed>;
    fn name(&self) -> &'static str;
}

/// Where the entries come from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    #[default]
    Google,
    Rss,
    Bing,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Google => "google",
            Method::Rss => "rss",
            Method::Bing => "bing",
        }
    }

    /// Label returned to API callers.
    pub fn label(&self) -> &'static str {
        match self {
            Method::Google => "Google News",
            Method::Rss => "RSS",
            Method::Bing => "Bing News",
        }
    }
}
