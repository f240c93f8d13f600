use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use nt_core::{featured, filter, Article, Error, FilterCriteria, RetrievalResult};

use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsView {
    pub category: String,
    pub query: String,
    pub articles: Vec<Article>,
    /// Headline article; omitted while a text query is active.
    pub featured: Option<Article>,
    pub total: usize,
    pub visible: usize,
    pub error: Option<String>,
    pub fetched_at: Option<DateTime<Utc>>,
    pub loading: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct RefreshParams {
    pub topic: Option<String>,
}

pub async fn list_news(
    State(state): State<Arc<AppState>>,
    Query(criteria): Query<FilterCriteria>,
) -> Json<NewsView> {
    let snapshot = state.manager.snapshot();
    let (all, error, fetched_at) = match snapshot.result {
        Some(RetrievalResult {
            articles,
            error,
            fetched_at,
        }) => (articles, error, Some(fetched_at)),
        None => (Vec::new(), None, None),
    };

    let articles = filter(&all, &criteria);
    let headline = if criteria.query.is_empty() {
        featured(&articles).cloned()
    } else {
        None
    };

    Json(NewsView {
        total: all.len(),
        visible: articles.len(),
        featured: headline,
        articles,
        category: criteria.category,
        query: criteria.query,
        error,
        fetched_at,
        loading: snapshot.loading,
    })
}

/// Runs the pipeline on its own task so a client hanging up mid-refresh
/// cannot abandon the run.
pub async fn refresh_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RefreshParams>,
) -> Response {
    info!("🔄 Refresh requested (topic: {:?})", params.topic);
    let manager = state.manager.clone();
    let run = tokio::spawn(async move { manager.run(params.topic.as_deref()).await });
    match run.await {
        Ok(result) => Json(result).into_response(),
        Err(err) => {
            error!("Refresh task failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "refresh failed" })),
            )
                .into_response()
        }
    }
}

pub async fn list_categories(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.manager.taxonomy().filter_options())
}

pub async fn list_trending(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(state.trending_topics.clone())
}

pub async fn relay_preflight() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
            (
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("POST, OPTIONS"),
            ),
            (
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("Content-Type"),
            ),
        ],
    )
}

pub async fn relay_forward(State(state): State<Arc<AppState>>, body: axum::body::Bytes) -> Response {
    let headers = [
        (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*")),
    ];
    match state.relay.forward(body.to_vec()).await {
        Ok((status, upstream_body)) => (status, headers, upstream_body).into_response(),
        Err(err) => {
            let status = match err {
                Error::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::BAD_GATEWAY,
            };
            let body = json!({
                "type": "error",
                "error": { "type": "relay_error", "message": err.to_string() }
            });
            (status, headers, body.to_string()).into_response()
        }
    }
}
