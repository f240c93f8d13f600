use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub mod handlers;
pub mod relay;
pub mod state;

pub use relay::Relay;
pub use state::AppState;

/// Dashboard API plus the LLM relay. The relay answers CORS itself, so the
/// permissive layer only wraps the dashboard routes.
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::permissive();

    let dashboard = Router::new()
        .route("/api/news", get(handlers::list_news))
        .route("/api/news/refresh", post(handlers::refresh_news))
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/trending", get(handlers::list_trending))
        .layer(cors);

    let relay = Router::new().route(
        "/api/claude",
        post(handlers::relay_forward).options(handlers::relay_preflight),
    );

    dashboard.merge(relay).with_state(Arc::new(state))
}

pub mod prelude {
    pub use crate::{create_app, AppState, Relay};
    pub use nt_core::{Article, Error, Result};
}
