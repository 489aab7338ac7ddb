// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{
    handlers::{self, admin},
    state::AppState,
    store::local::FILES_ROUTE,
};

/// Assembles the main application router.
///
/// * Admin panel routes (snapshot, display sections, retry).
/// * Static serving of the local blob store under `/files`.
/// * Global middleware (Trace, CORS).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let admin_routes = Router::new()
        .route("/panel", get(admin::get_panel))
        .route("/panel/sections", get(admin::get_sections))
        .route("/panel/refresh", post(admin::refresh_panel));

    let files = ServeDir::new(&state.config.uploads_dir);

    Router::new()
        .nest("/api/admin", admin_routes)
        .nest_service(&format!("/{}", FILES_ROUTE), files)
        .fallback(handlers::fallback)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
