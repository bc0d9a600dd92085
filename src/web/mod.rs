//! HTTP dashboard over the clean dataset

pub mod handlers;
pub mod models;
pub mod router;
pub mod state;
pub mod templates;

use anyhow::Context;
use tracing::{info, warn};

use crate::config::DashboardConfig;
use crate::observability::metrics;

pub use router::app_router;
pub use state::AppState;

/// Bind the configured address and serve until the process is stopped
pub async fn serve(config: DashboardConfig) -> anyhow::Result<()> {
    if let Err(e) = metrics::init() {
        warn!("Continuing without metrics: {}", e);
    }

    let bind_addr = config.bind_addr();
    let data_path = config.data_path.display().to_string();
    let app = app_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind dashboard to {}", bind_addr))?;

    info!(
        "Dashboard listening on http://{} (data: {})",
        bind_addr, data_path
    );
    axum::serve(listener, app).await.context("Dashboard server failed")?;
    Ok(())
}
