//! API handlers for the scrapbook REST endpoints

pub mod health;
pub mod openapi;
pub mod scrapbooks;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::AppState;

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Scrapbooks
        .route("/scrapbooks/:year", get(scrapbooks::get_published))
        .route("/scrapbooks/:year/content", get(scrapbooks::list_content))
        .route("/scrapbooks/:year/pages", get(scrapbooks::list_pages))
        .route("/scrapbooks/:year/preview", get(scrapbooks::preview))
        .route("/scrapbooks/:year/generate", post(scrapbooks::generate))
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
