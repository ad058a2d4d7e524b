//! Site health hooks.
//!
//! Two stateless JSON endpoints used to check a site's deploy and form
//! plumbing:
//!
//! - `POST /api/health/deploy` acknowledges a deployment lifecycle event and
//!   writes one structured log record for it.
//! - `POST /api/health/form-test` validates a contact form submission without
//!   storing it.
//!
//! Both answer CORS preflights with 204 and attach the same CORS headers to
//! every other response.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Error taxonomy and its HTTP mapping
//! - [`models`]: Request and response types
//! - [`validation`]: Form field rules
//! - [`api`]: HTTP router, middleware and handlers
//! - [`metrics`]: Prometheus counters and latency
//! - [`utils`]: Timestamps and shutdown signalling

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod utils;
pub mod validation;

pub use config::Config;
pub use error::{ApiError, Fault, Result};
