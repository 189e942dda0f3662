// src/config/mod.rs
pub mod topics;

use std::path::PathBuf;

pub const ENV_FRONTEND_DIR: &str = "FRONTEND_DIR";
pub const DEFAULT_FRONTEND_DIR: &str = "frontend";

pub const ENV_USER_AGENT: &str = "NEWS_USER_AGENT";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; KeywordNewsAggregator/0.1)";

/// Directory the static UI is served from.
pub fn frontend_dir() -> PathBuf {
    std::env::var(ENV_FRONTEND_DIR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_FRONTEND_DIR))
}

/// User-Agent for outbound feed requests (some feed hosts reject the reqwest default).
pub fn user_agent() -> String {
    std::env::var(ENV_USER_AGENT)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string())
}
