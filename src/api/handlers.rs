//! HTTP API handlers.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::clock::Clock;

/// Service name reported by `/info`.
pub const SERVICE_NAME: &str = "Simple Backend API";
/// Service name reported by `/health`.
pub const HEALTH_SERVICE_NAME: &str = "backend-api";
/// Service version reported by `/info`.
pub const SERVICE_VERSION: &str = "1.0.0";
/// Web framework label reported by `/info`.
pub const FRAMEWORK: &str = "axum";
/// Async runtime label reported by `/info`.
pub const RUNTIME: &str = "tokio";

/// `(path, method, description)` for every public endpoint, in catalog order.
pub const ENDPOINTS: [(&str, &str, &str); 4] = [
    ("/", "GET", "Root endpoint"),
    ("/health", "GET", "Health check"),
    ("/info", "GET", "Service information"),
    ("/test", "GET", "Test endpoint"),
];

/// Application state shared with handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Deployment environment name.
    pub environment: Arc<str>,
    /// Timestamp source.
    pub clock: Clock,
}

impl AppState {
    /// Create new app state.
    pub fn new(environment: impl Into<Arc<str>>) -> Self {
        Self {
            environment: environment.into(),
            clock: Clock::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new("development")
    }
}

/// Root response.
#[derive(Debug, Serialize, ToSchema)]
pub struct RootResponse {
    /// Greeting.
    pub message: String,
    /// Always "running".
    pub status: String,
    /// ISO-8601 time of the request.
    pub timestamp: String,
    /// Value of `ENV`, "development" when unset.
    pub environment: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always "healthy".
    pub status: String,
    /// ISO-8601 time of the request.
    pub timestamp: String,
    /// Service identifier.
    pub service: String,
}

/// One entry of the endpoint catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EndpointInfo {
    /// Route path.
    pub path: String,
    /// HTTP method.
    pub method: String,
    /// One-line description.
    pub description: String,
}

/// Service information response.
#[derive(Debug, Serialize, ToSchema)]
pub struct InfoResponse {
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Async runtime label.
    pub runtime: String,
    /// Web framework label.
    pub framework: String,
    /// Endpoint catalog.
    pub endpoints: Vec<EndpointInfo>,
}

/// Fixture payload of the test endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct TestData {
    /// Always `[1, 2, 3, 4, 5]`.
    pub numbers: Vec<u32>,
    /// Fixed text.
    pub text: String,
    /// Always `true`.
    pub boolean: bool,
}

/// Test endpoint response.
#[derive(Debug, Serialize, ToSchema)]
pub struct TestResponse {
    /// Fixed message.
    pub message: String,
    /// Fixture payload.
    pub data: TestData,
    /// ISO-8601 time of the request.
    pub timestamp: String,
}

/// The endpoint catalog served by `/info`.
pub fn endpoint_catalog() -> Vec<EndpointInfo> {
    ENDPOINTS
        .iter()
        .map(|(path, method, description)| EndpointInfo {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        })
        .collect()
}

/// Root endpoint.
#[utoipa::path(
    get,
    path = "/",
    tag = "status",
    responses((status = 200, description = "Greeting and environment", body = RootResponse))
)]
pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    Json(RootResponse {
        message: "Hello from Simple Backend!".to_string(),
        status: "running".to_string(),
        timestamp: state.clock.now_iso8601(),
        environment: state.environment.to_string(),
    })
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "status",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: state.clock.now_iso8601(),
        service: HEALTH_SERVICE_NAME.to_string(),
    })
}

/// Service information endpoint.
#[utoipa::path(
    get,
    path = "/info",
    tag = "status",
    responses((status = 200, description = "Service metadata and endpoint catalog", body = InfoResponse))
)]
pub async fn info() -> impl IntoResponse {
    Json(InfoResponse {
        service: SERVICE_NAME.to_string(),
        version: SERVICE_VERSION.to_string(),
        runtime: RUNTIME.to_string(),
        framework: FRAMEWORK.to_string(),
        endpoints: endpoint_catalog(),
    })
}

/// Test endpoint.
#[utoipa::path(
    get,
    path = "/test",
    tag = "status",
    responses((status = 200, description = "Fixed test fixture", body = TestResponse))
)]
pub async fn test(State(state): State<AppState>) -> impl IntoResponse {
    Json(TestResponse {
        message: "Test endpoint working!".to_string(),
        data: TestData {
            numbers: vec![1, 2, 3, 4, 5],
            text: "This is a test response".to_string(),
            boolean: true,
        },
        timestamp: state.clock.now_iso8601(),
    })
}
