//! End-to-end tests of the status endpoints through the router.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::DateTime;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use homelab_stack::api::{create_router, AppState};
use homelab_stack::Config;

async fn get_json(app: Router, path: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn timestamp(body: &Value) -> DateTime<chrono::FixedOffset> {
    let raw = body["timestamp"].as_str().expect("timestamp is a string");
    DateTime::parse_from_rfc3339(raw).expect("timestamp is ISO-8601")
}

#[tokio::test]
async fn root_reports_running_in_development_by_default() {
    let (status, body) = get_json(create_router(AppState::default()), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Hello from Simple Backend!");
    assert_eq!(body["status"], "running");
    assert_eq!(body["environment"], "development");
    timestamp(&body);
}

#[tokio::test]
async fn root_echoes_configured_environment() {
    let config = Config::from_vars(vec![("ENV".to_string(), "production".to_string())]).unwrap();
    let app = create_router(AppState::new(config.env));

    let (_, body) = get_json(app, "/").await;
    assert_eq!(body["environment"], "production");
}

#[tokio::test]
async fn root_echoes_empty_environment() {
    let config = Config::from_vars(vec![("ENV".to_string(), String::new())]).unwrap();
    config.validate().unwrap();
    let app = create_router(AppState::new(config.env));

    let (status, body) = get_json(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["environment"], "");
}

#[tokio::test]
async fn health_reports_healthy() {
    let (status, body) = get_json(create_router(AppState::default()), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "backend-api");
    timestamp(&body);
}

#[tokio::test]
async fn info_lists_the_catalog_in_order() {
    let (status, body) = get_json(create_router(AppState::default()), "/info").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "Simple Backend API");
    assert_eq!(body["version"], "1.0.0");
    assert_eq!(body["framework"], "axum");
    assert_eq!(body["runtime"], "tokio");
    assert_eq!(
        body["endpoints"],
        json!([
            {"path": "/", "method": "GET", "description": "Root endpoint"},
            {"path": "/health", "method": "GET", "description": "Health check"},
            {"path": "/info", "method": "GET", "description": "Service information"},
            {"path": "/test", "method": "GET", "description": "Test endpoint"},
        ])
    );
}

#[tokio::test]
async fn test_endpoint_returns_fixture() {
    let (status, body) = get_json(create_router(AppState::default()), "/test").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Test endpoint working!");
    assert_eq!(
        body["data"],
        json!({
            "numbers": [1, 2, 3, 4, 5],
            "text": "This is a test response",
            "boolean": true,
        })
    );
    timestamp(&body);
}

#[tokio::test]
async fn timestamps_never_decrease_across_requests() {
    let app = create_router(AppState::default());
    let mut previous = None;

    for path in ["/", "/health", "/test", "/", "/health", "/test"] {
        let (_, body) = get_json(app.clone(), path).await;
        let ts = timestamp(&body);
        if let Some(prev) = previous {
            assert!(ts >= prev, "{path}: {ts} < {prev}");
        }
        previous = Some(ts);
    }
}
