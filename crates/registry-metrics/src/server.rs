use axum::{routing::get, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

use crate::{MetricsError, Result};

/// Prometheus scrape endpoint plus a liveness check
pub fn router(handle: PrometheusHandle) -> Router {
    Router::new()
        .route("/metrics", get(move || std::future::ready(handle.render())))
        .route("/health", get(|| async { "OK" }))
}

/// Serve [`router`] on `address` until the task is dropped
pub async fn serve(address: SocketAddr, handle: PrometheusHandle) -> Result<()> {
    let listener = TcpListener::bind(address)
        .await
        .map_err(|e| MetricsError::Server(e.to_string()))?;

    info!(address = %address, "Serving registry metrics");

    axum::serve(listener, router(handle))
        .await
        .map_err(|e| MetricsError::Server(e.to_string()))
}
