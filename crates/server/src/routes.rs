//! Route configuration.

use crate::handlers;
use crate::state::AppState;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_upload_size_usize();

    let file_routes = Router::new()
        .route("/static/upload", post(handlers::upload_file))
        .route("/static/download/{file_id}", get(handlers::download_file))
        .route("/static/file/{file_id}", get(handlers::serve_file))
        .route(
            "/static/delete/file/{file_id}",
            delete(handlers::remove_file),
        )
        .route("/static/all", get(handlers::list_all_files))
        .layer(DefaultBodyLimit::max(body_limit));

    Router::new()
        .route("/health", get(handlers::health_check))
        .merge(file_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
