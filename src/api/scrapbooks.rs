//! Scrapbook API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{content_item::ContentItemResponse, Page},
    services::scrapbook::GenerationReport,
    AppState,
};

/// Content items of a year, in generation order
#[derive(Serialize, ToSchema)]
pub struct ContentListResponse {
    pub year: i32,
    pub items: Vec<ContentItemResponse>,
}

/// Assembled page descriptors
#[derive(Serialize)]
pub struct PagesResponse {
    pub year: i32,
    pub pages: Vec<Page>,
}

/// List the content items of a year
#[utoipa::path(
    get,
    path = "/scrapbooks/{year}/content",
    tag = "scrapbooks",
    params(("year" = i32, Path, description = "Scrapbook year")),
    responses(
        (status = 200, description = "Content items", body = ContentListResponse),
        (status = 422, description = "A stored reference is malformed", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_content(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> AppResult<Json<ContentListResponse>> {
    let items = state.services.scrapbook.content(year).await?;
    Ok(Json(ContentListResponse {
        year,
        items: items.iter().map(ContentItemResponse::from).collect(),
    }))
}

/// Assemble the pages of a year without rendering them
#[utoipa::path(
    get,
    path = "/scrapbooks/{year}/pages",
    tag = "scrapbooks",
    params(("year" = i32, Path, description = "Scrapbook year")),
    responses(
        (status = 200, description = "Page descriptors, front cover first"),
        (status = 404, description = "No content or a missing referenced record", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_pages(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> AppResult<Json<PagesResponse>> {
    let pages = state.services.scrapbook.pages(year).await?;
    Ok(Json(PagesResponse { year, pages }))
}

/// Render a scrapbook without publishing it
#[utoipa::path(
    get,
    path = "/scrapbooks/{year}/preview",
    tag = "scrapbooks",
    params(("year" = i32, Path, description = "Scrapbook year")),
    responses(
        (status = 200, description = "Rendered HTML", body = String, content_type = "text/html"),
        (status = 404, description = "No content or a missing referenced record", body = crate::error::ErrorResponse)
    )
)]
pub async fn preview(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> AppResult<Html<String>> {
    let html = state.services.scrapbook.render(year).await?;
    Ok(Html(html))
}

/// Generate and publish the scrapbook of a year
#[utoipa::path(
    post,
    path = "/scrapbooks/{year}/generate",
    tag = "scrapbooks",
    params(("year" = i32, Path, description = "Scrapbook year")),
    responses(
        (status = 201, description = "Scrapbook generated", body = GenerationReport),
        (status = 404, description = "No content or a missing referenced record", body = crate::error::ErrorResponse),
        (status = 422, description = "A stored reference is malformed", body = crate::error::ErrorResponse)
    )
)]
pub async fn generate(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> AppResult<(StatusCode, Json<GenerationReport>)> {
    let report = state.services.scrapbook.generate(year).await?;
    Ok((StatusCode::CREATED, Json(report)))
}

/// Get the published scrapbook of a year
#[utoipa::path(
    get,
    path = "/scrapbooks/{year}",
    tag = "scrapbooks",
    params(("year" = i32, Path, description = "Scrapbook year")),
    responses(
        (status = 200, description = "Published HTML", body = String, content_type = "text/html"),
        (status = 404, description = "Not generated yet", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_published(
    State(state): State<AppState>,
    Path(year): Path<i32>,
) -> AppResult<Html<String>> {
    let html = state.services.scrapbook.published(year).await?;
    Ok(Html(html))
}
