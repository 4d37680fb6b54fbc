use std::sync::Arc;

use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use tokio::signal;
use tracing::{error, info};

use crate::api;
use crate::config::Config;
use crate::state::SharedState;

pub async fn run(config: Config, prometheus_handle: Option<PrometheusHandle>) -> Result<()> {
    info!(
        "Causelist v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let port = config.server.port;

    let state = Arc::new(
        SharedState::new(config)
            .await?
            .with_prometheus(prometheus_handle),
    );

    if state.sms.is_none() {
        info!("Twilio not configured; hearing reminders will not be sent");
    }

    let app = api::router(state).await;
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("Web server running at http://{addr}");

    let server = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Web server error: {}", e);
        }
    });

    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }

    server.abort();
    info!("Server stopped");

    Ok(())
}
