//! HTTP status service: four fixed JSON endpoints plus their OpenAPI document.

pub mod docs;
pub mod handlers;
pub mod routes;

pub use docs::ApiDoc;
pub use handlers::AppState;
pub use routes::create_router;
