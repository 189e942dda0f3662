// src/ingest/providers/mod.rs
pub mod bing;
pub mod google_news;
pub mod rss_direct;
