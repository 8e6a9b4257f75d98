//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, scrapbooks};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Thanksgiving Scrapbook API",
        version = "0.1.0",
        description = "Generation of the yearly Thanksgiving flipbook scrapbooks"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Scrapbooks
        scrapbooks::list_content,
        scrapbooks::list_pages,
        scrapbooks::preview,
        scrapbooks::generate,
        scrapbooks::get_published,
    ),
    components(
        schemas(
            scrapbooks::ContentListResponse,
            crate::models::content_item::ContentItemResponse,
            crate::models::content_item::ContentType,
            crate::services::scrapbook::GenerationReport,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "scrapbooks", description = "Scrapbook content, preview and generation")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
