//! Axum router configuration with middleware.
//!
//! Middleware: CORS (any origin, method and header), request tracing.
//!
//! When `server.web_dir` is configured and exists, unknown paths fall
//! through to the static front-end with `index.html` as the fallback.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let web_dir = state.config.server.web_dir.clone();

    let mut router = Router::new()
        .route("/", get(handlers::meta::root))
        .route("/docs", get(handlers::meta::docs))
        .route("/health", get(handlers::meta::health))
        .route("/chat", post(handlers::chat::chat))
        .route("/history/{session_id}", get(handlers::history::get_history))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if let Some(web_dir) = web_dir {
        if web_dir.is_dir() {
            let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(web_dir.join("index.html")));
            router = router.fallback_service(serve_dir);
            tracing::info!(path = %web_dir.display(), "Static front-end serving enabled");
        } else {
            tracing::warn!(path = %web_dir.display(), "Web directory not found; serving API only");
        }
    }

    router
}
