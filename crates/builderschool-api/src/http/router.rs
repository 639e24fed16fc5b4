//! Axum router configuration with middleware.
//!
//! Wizard routes live under `/api/v1/session`. `GET /` serves the embedded
//! single-page wizard; when `BSCHOOL_WEB_DIR` points at an existing
//! directory, that directory is served instead.

use axum::Router;
use axum::response::Html;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

const INDEX_HTML: &str = include_str!("../../web/index.html");

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let session_routes = Router::new()
        .route("/idea", post(handlers::session::submit_idea))
        .route("/change-idea", post(handlers::session::change_idea))
        .route("/mentor/start", post(handlers::session::start_mentor_session))
        .route("/mentor/answer", post(handlers::session::answer_question))
        .route("/mentor/restart", post(handlers::session::restart_qa))
        .route("/mentor/back", post(handlers::session::back_to_refinement))
        .route("/evaluation", post(handlers::session::see_evaluation))
        .route("/evaluation/back", post(handlers::session::back_to_mentor))
        .route(
            "/prototype",
            post(handlers::session::generate_prototype).get(handlers::session::download_prototype),
        )
        .route("/start-over", post(handlers::session::start_over))
        .route(
            "/api-key",
            get(handlers::session::get_credentials).post(handlers::session::set_credentials),
        )
        .route("/export", get(handlers::session::download_export));

    let mut router = Router::new()
        .route("/api/v1/session", get(handlers::session::get_session))
        .nest("/api/v1/session", session_routes)
        .route("/health", get(health_check));

    let web_dir = std::env::var("BSCHOOL_WEB_DIR").ok();
    match web_dir.filter(|dir| std::path::Path::new(dir).is_dir()) {
        Some(dir) => {
            let index_path = format!("{dir}/index.html");
            router = router.fallback_service(ServeDir::new(&dir).fallback(ServeFile::new(index_path)));
            tracing::info!(path = %dir, "serving web UI from disk");
        }
        None => {
            router = router.route("/", get(index));
        }
    }

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - The embedded wizard page.
async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
