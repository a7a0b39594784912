//! OpenAPI document for the status endpoints.

use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

use super::handlers::{
    self, EndpointInfo, HealthResponse, InfoResponse, RootResponse, TestData, TestResponse,
};

/// Path of the generated OpenAPI JSON.
pub const OPENAPI_PATH: &str = "/openapi.json";

/// OpenAPI description of the status service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Simple Backend API",
        version = "1.0.0",
        description = "A simple web server for testing"
    ),
    paths(
        handlers::root,
        handlers::health,
        handlers::info,
        handlers::test
    ),
    components(schemas(
        RootResponse,
        HealthResponse,
        InfoResponse,
        EndpointInfo,
        TestResponse,
        TestData
    )),
    tags((name = "status", description = "Static status endpoints"))
)]
pub struct ApiDoc;

/// Serve the OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
