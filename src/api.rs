use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::config::topics::TopicRegistry;
use crate::ingest::{self, types::FeedFetcher, types::Method};
use crate::response::NewsResponse;
use crate::window::{civil_now, TimeWindow};

pub const DEFAULT_DAYS: i64 = 7;

#[derive(Clone)]
pub struct AppState {
    topics: Arc<TopicRegistry>,
    fetcher: Arc<dyn FeedFetcher>,
}

impl AppState {
    pub fn new(topics: TopicRegistry, fetcher: Arc<dyn FeedFetcher>) -> Self {
        Self {
            topics: Arc::new(topics),
            fetcher,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/topics", get(list_topics))
        .route("/api/news/{topic}", get(news))
        .fallback_service(ServeDir::new(crate::config::frontend_dir()))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug)]
pub enum ApiError {
    UnknownTopic(String),
    BadQuery(String),
    DaysOutOfRange { days: i64, max: u32 },
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadQuery(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::UnknownTopic(slug) => (StatusCode::NOT_FOUND, format!("unknown topic '{slug}'")),
            ApiError::BadQuery(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::DaysOutOfRange { days, max } => (
                StatusCode::BAD_REQUEST,
                format!("days must be between 1 and {max}, got {days}"),
            ),
        };
        (status, Json(serde_json::json!({ "error": msg }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    #[serde(default, alias = "dias")]
    days: Option<i64>,
    #[serde(default, alias = "metodo")]
    method: Option<Method>,
}

fn validate_days(days: Option<i64>, max: u32) -> Result<u32, ApiError> {
    let days = days.unwrap_or(DEFAULT_DAYS);
    if days < 1 || days > i64::from(max) {
        return Err(ApiError::DaysOutOfRange { days, max });
    }
    Ok(days as u32)
}

async fn news(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    query: Result<Query<NewsQuery>, QueryRejection>,
) -> Result<Json<NewsResponse>, ApiError> {
    let topic = state
        .topics
        .get(&slug)
        .ok_or_else(|| ApiError::UnknownTopic(slug.clone()))?;
    let Query(q) = query?;
    let days = validate_days(q.days, topic.max_days)?;
    let method = q.method.unwrap_or_default();

    let window = TimeWindow::resolve(days, civil_now());
    let (items, _stats) = ingest::run(state.fetcher.as_ref(), topic, method, &window).await;

    Ok(Json(NewsResponse::assemble(topic, days, method, items)))
}

#[derive(Serialize)]
struct TopicOut {
    slug: String,
    label: String,
    max_days: u32,
}

async fn list_topics(State(state): State<AppState>) -> Json<Vec<TopicOut>> {
    let out = state
        .topics
        .iter()
        .map(|t| TopicOut {
            slug: t.slug.clone(),
            label: t.label.clone(),
            max_days: t.max_days,
        })
        .collect::<Vec<_>>();
    Json(out)
}
