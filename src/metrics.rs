//! Prometheus metrics for the health hook endpoints.
//!
//! This module provides:
//! - Deploy event counters labelled by lifecycle stage
//! - Form validation outcome counters
//! - Handler error counters labelled by error kind
//! - Per-endpoint request latency

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Deploy events received counter metric name.
pub const METRIC_DEPLOY_EVENTS_RECEIVED: &str = "deploy_events_received_total";
/// Form validations counter metric name.
pub const METRIC_FORM_VALIDATIONS: &str = "form_validations_total";
/// Handler errors counter metric name.
pub const METRIC_HANDLER_ERRORS: &str = "handler_errors_total";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";

/// Install the Prometheus recorder and describe all metrics.
/// Call this once at startup; the returned handle renders the exposition.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Initialize all metric descriptions.
pub fn init_metrics() {
    describe_counter!(
        METRIC_DEPLOY_EVENTS_RECEIVED,
        "Total number of deploy events received"
    );
    describe_counter!(
        METRIC_FORM_VALIDATIONS,
        "Total number of test form validations by outcome"
    );
    describe_counter!(
        METRIC_HANDLER_ERRORS,
        "Total number of error responses by kind"
    );
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Increment deploy events counter.
pub fn inc_deploy_events(lifecycle: &'static str) {
    counter!(METRIC_DEPLOY_EVENTS_RECEIVED, "lifecycle" => lifecycle).increment(1);
}

/// Increment form validations counter.
pub fn inc_form_validations(passed: bool) {
    let outcome = if passed { "passed" } else { "failed" };
    counter!(METRIC_FORM_VALIDATIONS, "outcome" => outcome).increment(1);
}

/// Increment handler errors counter.
pub fn inc_handler_errors(kind: &'static str) {
    counter!(METRIC_HANDLER_ERRORS, "kind" => kind).increment(1);
}

/// RAII guard for timing a request.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    endpoint: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given endpoint.
    pub fn new(endpoint: &'static str) -> Self {
        Self {
            start: Instant::now(),
            endpoint,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(METRIC_HTTP_REQUEST_LATENCY, "endpoint" => self.endpoint)
            .record(self.elapsed_ms());
    }
}
