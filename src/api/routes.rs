//! HTTP API route definitions.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::docs::{openapi_json, OPENAPI_PATH};
use super::handlers::{health, info, root, test, AppState};
use crate::metrics;

/// Create the API router.
///
/// CORS is fully permissive (any origin, method and header). Unknown paths
/// get a 404 and non-GET methods on known paths a 405 from axum itself.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/info", get(info))
        .route("/test", get(test))
        .route(OPENAPI_PATH, get(openapi_json))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let response = next.run(req).await;

    metrics::record_http_latency(start, &endpoint);
    metrics::inc_http_requests(&endpoint, response.status().as_u16());
    response
}
