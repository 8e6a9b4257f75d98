//! HTTP surface tests, driving the router without a listener

mod common;

use std::path::Path;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use common::{service, MemoryStore};
use scrapbook_server::{api, config::AppConfig, services::Services, AppState};

fn app(store: MemoryStore, output_dir: &Path) -> Router {
    let mut config = AppConfig::default();
    config.scrapbook.output_dir = output_dir.to_path_buf();
    let scrapbook = service(Arc::new(store), output_dir, None);

    api::router(AppState {
        config: Arc::new(config),
        services: Arc::new(Services { scrapbook }),
    })
}

fn thanksgiving_2020() -> MemoryStore {
    MemoryStore::new(2020)
        .event(7)
        .photos(1..=2)
        .item("title", "Thanksgiving")
        .item("menu", "menu_7")
        .item("photo", "photo_1")
        .item("photo", "photo_2")
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, String, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, content_type, body)
}

fn json(body: &[u8]) -> Value {
    serde_json::from_slice(body).unwrap()
}

#[tokio::test]
async fn test_health() {
    let dir = tempfile::tempdir().unwrap();
    let (status, _, body) = send(app(MemoryStore::new(2020), dir.path()), Method::GET, "/api/v1/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["status"], "healthy");
}

#[tokio::test]
async fn test_content_lists_items_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let (status, _, body) = send(
        app(thanksgiving_2020(), dir.path()),
        Method::GET,
        "/api/v1/scrapbooks/2020/content",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let body = json(&body);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["content_type"], "title");
    assert_eq!(items[1]["content_reference"], "menu_7");
}

#[tokio::test]
async fn test_pages_start_with_front_cover() {
    let dir = tempfile::tempdir().unwrap();
    let (status, _, body) = send(
        app(thanksgiving_2020(), dir.path()),
        Method::GET,
        "/api/v1/scrapbooks/2020/pages",
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let body = json(&body);
    let pages = body["pages"].as_array().unwrap();
    assert_eq!(pages.len(), 5);
    assert_eq!(pages[0]["type"], "front-cover");
    assert_eq!(pages[3]["type"], "photo-page");
    assert_eq!(pages[4]["type"], "back-cover");
}

#[tokio::test]
async fn test_generate_then_fetch_published() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(thanksgiving_2020(), dir.path());

    let (status, _, _) = send(app.clone(), Method::GET, "/api/v1/scrapbooks/2020").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = send(app.clone(), Method::POST, "/api/v1/scrapbooks/2020/generate").await;
    assert_eq!(status, StatusCode::CREATED);
    let report = json(&body);
    assert_eq!(report["page_count"], 5);
    assert_eq!(report["mirrored"], false);

    let (status, content_type, body) = send(app, Method::GET, "/api/v1/scrapbooks/2020").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));
    assert_eq!(body, std::fs::read(dir.path().join("2020.html")).unwrap());
}

#[tokio::test]
async fn test_preview_does_not_publish() {
    let dir = tempfile::tempdir().unwrap();
    let (status, _, body) = send(
        app(thanksgiving_2020(), dir.path()),
        Method::GET,
        "/api/v1/scrapbooks/2020/preview",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("id=\"page-front-cover\""));
    assert!(!dir.path().join("2020.html").exists());
}

#[tokio::test]
async fn test_empty_year_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let (status, _, body) = send(
        app(thanksgiving_2020(), dir.path()),
        Method::POST,
        "/api/v1/scrapbooks/2017/generate",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json(&body)["error"], "NoContent");
}

#[tokio::test]
async fn test_malformed_reference_is_unprocessable() {
    let dir = tempfile::tempdir().unwrap();
    let store = MemoryStore::new(2021).item("menu", "menu_abc");
    let (status, _, body) = send(
        app(store, dir.path()),
        Method::POST,
        "/api/v1/scrapbooks/2021/generate",
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json(&body)["error"], "InvalidReference");
    assert!(!dir.path().join("2021.html").exists());
}

#[tokio::test]
async fn test_year_out_of_range_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let (status, _, _) = send(
        app(thanksgiving_2020(), dir.path()),
        Method::GET,
        "/api/v1/scrapbooks/20200/pages",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
