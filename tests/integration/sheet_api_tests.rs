//! API Integration Tests
//!
//! Tests the HTTP surface end to end against a stubbed sheet source:
//! - Root banner and health
//! - Cache miss, fetch and rank
//! - Cache hit
//! - 404 / 500 error bodies
//!
//! Uses axum-test for HTTP testing.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use axum_test::TestServer;
use leaderboard_proxy::{router, AppState, FetchError, SheetCache, SheetRows, SheetSource};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

/// What the stub answers for every event
enum Reply {
    Rows(SheetRows),
    Empty,
    Fail(String),
}

struct StubSource {
    reply: Reply,
    calls: AtomicUsize,
}

impl StubSource {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SheetSource for StubSource {
    async fn fetch_values(&self, _event: &str) -> Result<SheetRows, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Reply::Rows(rows) => Ok(rows.clone()),
            Reply::Empty => Err(FetchError::NoData),
            Reply::Fail(message) => Err(FetchError::Http(message.clone())),
        }
    }
}

fn scenario_rows() -> SheetRows {
    [["Name", "Score"], ["Alice", "10"], ["Bob", "25"], ["Cara", "x"]]
        .iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

fn server_with(source: Arc<StubSource>, ttl_secs: i64) -> TestServer {
    let state = Arc::new(AppState::new(SheetCache::new(ttl_secs), source));
    TestServer::new(router(state)).unwrap()
}

// =============================================================================
// ROOT / HEALTH
// =============================================================================

#[tokio::test]
async fn test_root_returns_banner() {
    let state = Arc::new(AppState::new(
        SheetCache::default(),
        StubSource::new(Reply::Empty),
    ));
    let app = router(state);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"Leaderboard API");
}

#[tokio::test]
async fn test_health_reports_cached_events() {
    let server = server_with(StubSource::new(Reply::Rows(scenario_rows())), 3600);

    server.get("/sheet/Finals").await.assert_status_ok();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["cached_events"], 1);
    assert!(json["uptime_seconds"].is_number());
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let state = Arc::new(AppState::new(
        SheetCache::default(),
        StubSource::new(Reply::Empty),
    ));
    let app = router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("Origin", "https://leaderboard.example.org")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

// =============================================================================
// SHEET ENDPOINT
// =============================================================================

#[tokio::test]
async fn test_miss_fetches_and_ranks() {
    let source = StubSource::new(Reply::Rows(scenario_rows()));
    let server = server_with(source.clone(), 3600);

    let response = server.get("/sheet/Finals").await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["source"], "google-sheets");
    assert_eq!(json["event"], "Finals");
    assert_eq!(json["data"], json!(scenario_rows()));
    assert_eq!(
        json["top10"],
        json!([
            { "name": "Bob", "points": 25.0 },
            { "name": "Alice", "points": 10.0 },
            { "name": "Cara", "points": 0.0 },
        ])
    );
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_second_request_served_from_cache() {
    let source = StubSource::new(Reply::Rows(scenario_rows()));
    let server = server_with(source.clone(), 3600);

    let first: Value = server.get("/sheet/Finals").await.json();
    let second: Value = server.get("/sheet/Finals").await.json();

    assert_eq!(first["source"], "google-sheets");
    assert_eq!(second["source"], "cache");
    assert_eq!(second["event"], "Finals");
    assert_eq!(second["data"], first["data"]);
    assert_eq!(second["top10"], first["top10"]);
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn test_events_cached_separately() {
    let source = StubSource::new(Reply::Rows(scenario_rows()));
    let server = server_with(source.clone(), 3600);

    server.get("/sheet/Heats").await.assert_status_ok();
    let other: Value = server.get("/sheet/Finals").await.json();

    assert_eq!(other["source"], "google-sheets");
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_expired_entry_refetches() {
    let source = StubSource::new(Reply::Rows(scenario_rows()));
    let server = server_with(source.clone(), 0);

    server.get("/sheet/Finals").await.assert_status_ok();
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    let again: Value = server.get("/sheet/Finals").await.json();

    assert_eq!(again["source"], "google-sheets");
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_encoded_event_name() {
    let source = StubSource::new(Reply::Rows(scenario_rows()));
    let server = server_with(source, 3600);

    let json: Value = server.get("/sheet/Round%201").await.json();

    assert_eq!(json["event"], "Round 1");
}

#[tokio::test]
async fn test_header_only_sheet_has_empty_top10() {
    let rows = vec![vec!["Name".to_string(), "Score".to_string()]];
    let server = server_with(StubSource::new(Reply::Rows(rows)), 3600);

    let response = server.get("/sheet/Finals").await;
    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["top10"], json!([]));
    assert_eq!(json["data"], json!([["Name", "Score"]]));
}

#[tokio::test]
async fn test_empty_sheet_is_not_found() {
    let source = StubSource::new(Reply::Empty);
    let server = server_with(source.clone(), 3600);

    let response = server.get("/sheet/Finals").expect_failure().await;
    response.assert_status(StatusCode::NOT_FOUND);

    let json: Value = response.json();
    assert_eq!(json, json!({ "error": "No data found for event sheet: Finals" }));

    // Nothing cached, the next request asks upstream again
    server.get("/sheet/Finals").expect_failure().await;
    assert_eq!(source.calls(), 2);
}

#[tokio::test]
async fn test_fetch_failure_is_internal_error() {
    let source = StubSource::new(Reply::Fail("connection refused".to_string()));
    let server = server_with(source, 3600);

    let response = server.get("/sheet/Finals").expect_failure().await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let json: Value = response.json();
    assert_eq!(
        json,
        json!({
            "error": "Failed to fetch sheet data",
            "details": "connection refused",
        })
    );
}

#[tokio::test]
async fn test_unknown_route() {
    let server = server_with(StubSource::new(Reply::Empty), 3600);

    server
        .get("/api/questions")
        .expect_failure()
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
