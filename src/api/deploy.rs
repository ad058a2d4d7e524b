//! Deploy webhook: logs one structured record per lifecycle event.
//!
//! The record is informative only. Nothing here suppresses alerts or keeps
//! track of deployment windows.

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::header,
    response::IntoResponse,
    Json,
};
use tracing::info;

use super::handlers::{AppState, NO_CACHE};
use crate::error::Result;
use crate::metrics::{self, LatencyTimer};
use crate::models::{DeployAck, DeployEvent};
use crate::utils::iso_now;

/// `POST /api/health/deploy`
pub async fn deploy_webhook(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<impl IntoResponse> {
    let _timer = LatencyTimer::new("deploy");

    let body = body?;
    let event = DeployEvent::from_slice(&body)?;
    let received_at = iso_now()?;

    let config = &state.config;
    let lifecycle: Option<&'static str> = event.kind().map(Into::into);
    let event_type = event.event_type_text();
    let deployment_id = event.deployment_id();
    let deployment_url = event.deployment_url();
    let deployment_name = event.deployment_name();

    info!(
        target: "deploy",
        site_id = %config.site_id,
        site_name = %config.site_name,
        environment = %config.environment,
        event_type = event_type.as_deref(),
        lifecycle,
        deployment_id = deployment_id.as_deref(),
        deployment_url = deployment_url.as_deref(),
        deployment_name = deployment_name.as_deref(),
        timestamp = %received_at,
        "Deploy event received"
    );
    metrics::inc_deploy_events(lifecycle.unwrap_or("unknown"));

    Ok((
        [(header::CACHE_CONTROL, NO_CACHE)],
        Json(DeployAck {
            status: "received",
            event_type: event.event_type().cloned(),
            received_at,
        }),
    ))
}
