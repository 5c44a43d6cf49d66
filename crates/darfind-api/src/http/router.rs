//! Axum router configuration with middleware.
//!
//! `POST /chatbot` and `GET /health` are always served. When the web
//! directory exists, `GET /` returns its `index.html` and `/static/*` serves
//! the assets under `<web_dir>/static`.

use axum::Router;
use axum::routing::{get, post};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/chatbot", post(handlers::chat::chat))
        .route("/health", get(health_check));

    let web_dir = state.web_dir.clone();
    if web_dir.exists() {
        router = router
            .route_service("/", ServeFile::new(web_dir.join("index.html")))
            .nest_service("/static", ServeDir::new(web_dir.join("static")));
        tracing::info!(path = %web_dir.display(), "Chat page serving enabled");
    } else {
        tracing::warn!(
            path = %web_dir.display(),
            "Web directory not found, serving the API only"
        );
    }

    router
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - liveness check, no auth required.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
