//! Small shared helpers: timestamps and shutdown signalling.

use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};
use tracing::info;

/// `YYYY-MM-DDTHH:MM:SS.mmmZ`, always UTC with millisecond precision.
const ISO_MILLIS: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

/// Format an instant as an ISO-8601 UTC timestamp with milliseconds.
pub fn format_iso(at: OffsetDateTime) -> Result<String, time::error::Format> {
    at.to_offset(time::UtcOffset::UTC).format(ISO_MILLIS)
}

/// Current time as an ISO-8601 UTC timestamp with milliseconds.
pub fn iso_now() -> Result<String, time::error::Format> {
    format_iso(OffsetDateTime::now_utc())
}

/// Resolve when the process receives Ctrl-C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
