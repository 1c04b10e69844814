use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use leafy_gateway::app::RESERVED_CODES;
use leafy_gateway::{App, AppState};
use leafy_generator::RandomGenerator;
use leafy_storage::InMemoryBackend;
use leafy_store::LinkStoreService;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

struct Fixture {
    public_dir: TempDir,
    router: Router,
}

impl Fixture {
    fn new() -> Self {
        Self::with_base_url(None)
    }

    fn with_base_url(public_base_url: Option<&str>) -> Self {
        let public_dir = TempDir::new().unwrap();
        std::fs::write(
            public_dir.path().join("index.html"),
            "<h1>Leafy Shortener</h1>",
        )
        .unwrap();

        let store = LinkStoreService::new(InMemoryBackend::new(), RandomGenerator::new())
            .with_reserved_codes(RESERVED_CODES);
        let state = AppState::new(Arc::new(store), public_base_url.map(str::to_string));
        let router = App::router(state, public_dir.path());

        Self { public_dir, router }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn shorten(&self, body: Value) -> (StatusCode, Value) {
        self.post_shorten(Some("application/json"), body.to_string()).await
    }

    async fn post_shorten(
        &self,
        content_type: Option<&str>,
        body: impl Into<Body>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method("POST").uri("/shorten");
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        let response = self.send(request.body(body.into()).unwrap()).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .uri(uri)
            .header(header::HOST, "leafy.link")
            .body(Body::empty())
            .unwrap();
        let response = self.send(request).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }
}

#[tokio::test]
async fn shorten_with_generated_code_then_preview() {
    let fixture = Fixture::new();

    let (status, body) = fixture
        .shorten(json!({ "url": "https://example.com/page" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let code = body["shortcode"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 7);
    assert!(code.bytes().all(|b| b.is_ascii_alphanumeric()));

    let (status, html) = fixture.get(&format!("/{code}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("https://example.com/page"));
    assert!(html.contains(&format!("https://leafy.link/{code}")));
}

#[tokio::test]
async fn shorten_with_custom_code_twice() {
    let fixture = Fixture::new();

    let (status, body) = fixture
        .shorten(json!({ "url": "https://other.com", "shortcode": "abc1234" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "shortcode": "abc1234" }));

    let (status, body) = fixture
        .shorten(json!({ "url": "https://third.com", "shortcode": "abc1234" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Shortcode already exists" }));

    let (status, html) = fixture.get("/abc1234").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("https://other.com"));
    assert!(!html.contains("https://third.com"));
}

#[tokio::test]
async fn shorten_without_url() {
    let fixture = Fixture::new();

    let (status, body) = fixture.shorten(json!({ "shortcode": "abc1234" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "URL is required" }));

    let (status, body) = fixture
        .shorten(json!({ "url": "", "shortcode": "abc1234" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "URL is required" }));

    let (status, _) = fixture.get("/abc1234").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn shorten_with_reserved_code() {
    let fixture = Fixture::new();

    let (status, body) = fixture
        .shorten(json!({ "url": "https://example.com", "shortcode": "health" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Shortcode is reserved: health" }));

    let (status, body) = fixture.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("example.com"));
}

#[tokio::test]
async fn shorten_with_reserved_code_and_no_url() {
    let fixture = Fixture::new();

    let (status, body) = fixture.shorten(json!({ "shortcode": "health" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "URL is required" }));
}

#[tokio::test]
async fn shorten_with_malformed_body() {
    let fixture = Fixture::new();

    let (status, body) = fixture.post_shorten(Some("application/json"), "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Invalid request" }));
}

#[tokio::test]
async fn shorten_ignores_content_type() {
    let fixture = Fixture::new();

    let (status, body) = fixture
        .post_shorten(None, r#"{"url":"https://example.com","shortcode":"plain"}"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "shortcode": "plain" }));

    let (status, body) = fixture
        .post_shorten(
            Some("application/x-www-form-urlencoded"),
            r#"{"url":"https://example.com","shortcode":"form"}"#,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "shortcode": "form" }));

    let (status, _) = fixture.get("/form").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn preview_unknown_code() {
    let fixture = Fixture::new();

    let (status, body) = fixture.get("/nonexistent").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Short link not found");
}

#[tokio::test]
async fn preview_ignores_query_string() {
    let fixture = Fixture::new();
    fixture
        .shorten(json!({ "url": "https://example.com", "shortcode": "abc1234" }))
        .await;

    let (status, html) = fixture.get("/abc1234?utm_source=mail").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("https://leafy.link/abc1234"));
}

#[tokio::test]
async fn preview_is_case_sensitive() {
    let fixture = Fixture::new();
    fixture
        .shorten(json!({ "url": "https://example.com", "shortcode": "AbC" }))
        .await;

    let (status, _) = fixture.get("/abc").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn preview_uses_configured_base_url() {
    let fixture = Fixture::with_base_url(Some("https://lfy.to/"));
    fixture
        .shorten(json!({ "url": "https://example.com", "shortcode": "abc1234" }))
        .await;

    let (_, html) = fixture.get("/abc1234").await;
    assert!(html.contains("https://lfy.to/abc1234"));
}

#[tokio::test]
async fn index_page_is_served() {
    let fixture = Fixture::new();

    let (status, html) = fixture.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Leafy Shortener"));
}

#[tokio::test]
async fn missing_index_page() {
    let fixture = Fixture::new();
    std::fs::remove_file(fixture.public_dir.path().join("index.html")).unwrap();

    let (status, _) = fixture.get("/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health() {
    let fixture = Fixture::new();

    let (status, body) = fixture.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({ "status": "ok" })
    );
}
