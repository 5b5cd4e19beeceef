//! API layer -- axum routes, handlers, and middleware.

mod routes;
pub mod state;
pub mod ws;

use self::state::AppState;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Build the application router: dashboard pages, JSON pass-through API,
/// live anomaly feed relay, and static assets.
pub fn router(state: AppState) -> Router {
    let static_dir = state.config.server.static_dir.clone();

    Router::new()
        .merge(crate::views::routes())
        .nest("/api/v1", routes::api_routes())
        .route("/ws/anomalies", get(ws::anomaly_feed))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn fallback() -> (axum::http::StatusCode, &'static str) {
    (axum::http::StatusCode::NOT_FOUND, "not found")
}
