// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - GET /api/topics
// - GET /api/news/{topic}  (shape, aliases, validation errors)
// - static UI fallback

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use keyword_news_aggregator::ingest::fetcher::FixtureFetcher;
use keyword_news_aggregator::ingest::providers::google_news;
use keyword_news_aggregator::{api, AppState, TopicConfig, TopicRegistry};

const BODY_LIMIT: usize = 1024 * 1024;

fn feed_xml() -> String {
    let published = (Utc::now() - Duration::hours(2)).to_rfc2822();
    format!(
        r#"<rss version="2.0"><channel><title>Google Notícias</title>
<item><title>Governo anuncia novos royalties - Valor Econômico</title>
<link>https://valor.globo.com/royalties</link>
<pubDate>{published}</pubDate>
<description>ANP detalha leilão</description></item>
</channel></rss>"#
    )
}

/// Build the router the binary uses, backed by fixtures instead of the network.
fn test_router() -> Router {
    let topic = TopicConfig {
        slug: "royalties".into(),
        label: "Royalties".into(),
        keywords: vec!["royalties".into(), "anp".into()],
        publishers: vec!["Valor Econômico".into()],
        queries: vec!["royalties".into()],
        feeds: vec![],
        min_relevance: 1,
        max_days: 90,
    };
    let fpm = TopicConfig {
        slug: "fpm".into(),
        label: "FPM".into(),
        keywords: vec!["fpm".into()],
        publishers: vec![],
        queries: vec![],
        feeds: vec![],
        min_relevance: 1,
        max_days: 60,
    };
    let topics = TopicRegistry::new(vec![topic, fpm]).expect("valid topics");
    let fetcher =
        FixtureFetcher::new().with_feed(google_news::search_url("royalties"), feed_xml());
    api::router(AppState::new(topics, Arc::new(fetcher)))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build GET");
    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    (status, bytes)
}

#[tokio::test]
async fn api_health_returns_200_and_ok_body() {
    let (status, body) = get(test_router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(body).unwrap().trim(), "OK");
}

#[tokio::test]
async fn api_topics_lists_configured_topics() {
    let (status, body) = get(test_router(), "/api/topics").await;
    assert_eq!(status, StatusCode::OK);
    let v: Json = serde_json::from_slice(&body).expect("json");
    let arr = v.as_array().expect("array");
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["slug"], "royalties");
    assert_eq!(arr[1]["max_days"], 60);
}

#[tokio::test]
async fn api_news_returns_expected_json_fields() {
    let (status, body) = get(test_router(), "/api/news/royalties?days=7").await;
    assert_eq!(status, StatusCode::OK);

    let v: Json = serde_json::from_slice(&body).expect("parse news json");
    assert_eq!(v["type"], "Royalties");
    assert_eq!(v["period"], "Last 7 days");
    assert_eq!(v["method"], "Google News");
    assert_eq!(v["count"], 1);

    let item = &v["items"][0];
    assert_eq!(item["title"], "Governo anuncia novos royalties - Valor Econômico");
    assert_eq!(item["link"], "https://valor.globo.com/royalties");
    assert_eq!(item["source"], "Valor Econômico");
    assert_eq!(item["relevance"], 2);
    let date = item["date"].as_str().expect("date string");
    assert_eq!(date.len(), 10);
    assert_eq!(&date[2..3], "/");
    assert_eq!(&date[5..6], "/");
}

#[tokio::test]
async fn api_news_defaults_to_seven_days_google() {
    let (status, body) = get(test_router(), "/api/news/royalties").await;
    assert_eq!(status, StatusCode::OK);
    let v: Json = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["period"], "Last 7 days");
    assert_eq!(v["method"], "Google News");
}

#[tokio::test]
async fn api_news_accepts_portuguese_aliases() {
    let (status, body) = get(test_router(), "/api/news/royalties?dias=1&metodo=bing").await;
    assert_eq!(status, StatusCode::OK);
    let v: Json = serde_json::from_slice(&body).unwrap();
    assert_eq!(v["period"], "Today");
    assert_eq!(v["method"], "Bing News");
    // no bing fixture registered → fetch fails silently
    assert_eq!(v["count"], 0);
    assert_eq!(v["items"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn api_news_rejects_out_of_range_days() {
    for uri in [
        "/api/news/royalties?days=0",
        "/api/news/royalties?days=91",
        "/api/news/fpm?days=61",
    ] {
        let (status, body) = get(test_router(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        let v: Json = serde_json::from_slice(&body).unwrap();
        assert!(v["error"].as_str().unwrap().contains("days"), "{uri}");
    }
}

#[tokio::test]
async fn api_news_rejects_unknown_method_as_json() {
    let (status, body) = get(test_router(), "/api/news/royalties?method=yahoo").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let v: Json = serde_json::from_slice(&body).expect("json error body");
    assert!(v["error"].as_str().unwrap().contains("yahoo"));
}

#[tokio::test]
async fn api_news_rejects_non_numeric_days_as_json() {
    let (status, body) = get(test_router(), "/api/news/royalties?days=abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let v: Json = serde_json::from_slice(&body).expect("json error body");
    assert!(v["error"].is_string());
}

#[tokio::test]
async fn api_news_unknown_topic_is_404() {
    let (status, body) = get(test_router(), "/api/news/weather").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let v: Json = serde_json::from_slice(&body).unwrap();
    assert!(v["error"].as_str().unwrap().contains("weather"));
}

#[tokio::test]
async fn root_serves_frontend() {
    let (status, body) = get(test_router(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8_lossy(&body).contains("<html"));
}
