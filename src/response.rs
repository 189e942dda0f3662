//! # Response
//! Result records and the envelope returned by `/api/news/{topic}`.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::config::topics::TopicConfig;
use crate::ingest::types::Method;

/// One qualifying news entry. Lives for a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultItem {
    pub title: String,
    /// Original link as published, unique within one response.
    pub link: String,
    /// `DD/MM/YYYY` in the civil timezone.
    pub date: String,
    pub source: String,
    pub relevance: u32,
    /// Ranking tie-break; not part of the wire format.
    #[serde(skip)]
    pub published_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewsResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub period: String,
    pub method: String,
    pub count: usize,
    pub items: Vec<ResultItem>,
}

impl NewsResponse {
    pub fn assemble(topic: &TopicConfig, days: u32, method: Method, items: Vec<ResultItem>) -> Self {
        Self {
            kind: topic.label.clone(),
            period: period_label(days),
            method: method.label().to_string(),
            count: items.len(),
            items,
        }
    }
}

pub fn period_label(days: u32) -> String {
    if days == 1 {
        "Today".to_string()
    } else {
        format!("Last {days} days")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_labels() {
        assert_eq!(period_label(1), "Today");
        assert_eq!(period_label(7), "Last 7 days");
    }

    #[test]
    fn published_at_is_not_serialized() {
        let item = ResultItem {
            title: "t".into(),
            link: "l".into(),
            date: "01/02/2025".into(),
            source: "s".into(),
            relevance: 3,
            published_at: crate::window::civil_now(),
        };
        let v = serde_json::to_value(&item).unwrap();
        let keys: Vec<&str> = v.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys.len(), 5);
        assert!(v.get("published_at").is_none());
        assert_eq!(v["relevance"], 3);
    }
}
