//! HTTP API route definitions.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use super::cors::cors_preamble;
use super::deploy::deploy_webhook;
use super::form_test::form_test;
use super::handlers::{health, method_not_allowed, metrics, AppState};

/// Deploy webhook path.
pub const DEPLOY_PATH: &str = "/api/health/deploy";
/// Form test path.
pub const FORM_TEST_PATH: &str = "/api/health/form-test";

/// Router for the two hook endpoints, wrapped in the CORS preamble.
fn hook_routes() -> Router<AppState> {
    Router::new()
        .route(DEPLOY_PATH, post(deploy_webhook).fallback(method_not_allowed))
        .route(FORM_TEST_PATH, post(form_test).fallback(method_not_allowed))
        .route_layer(middleware::from_fn(cors_preamble))
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(hook_routes())
        // Health endpoints
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
