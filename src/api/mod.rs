//! HTTP API module for the deploy webhook and form test endpoints.

pub mod cors;
pub mod deploy;
pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
