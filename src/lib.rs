// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod api;
pub mod config;
pub mod ingest;
pub mod metrics;
pub mod publisher;
pub mod relevance;
pub mod response;
pub mod window;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::config::topics::{TopicConfig, TopicRegistry};
pub use crate::ingest::types::{FeedEntry, FeedFetcher, Method, ParsedFeed};
pub use crate::response::{NewsResponse, ResultItem};
