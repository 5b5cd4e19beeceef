//! Phalanx Dashboard -- security operations dashboard gateway.
//!
//! This crate serves the dashboard panels (anomalies, policies, connectors,
//! compliance reports) and relays the detector's live anomaly push feed.
//! Every data path is a direct pass-through to the platform's backend
//! services; the gateway holds no state beyond in-flight requests.

pub mod api;
pub mod config;
pub mod model;
pub mod upstream;
pub mod views;

use anyhow::Result;

/// Start the dashboard server on the configured bind address.
pub async fn serve(config: config::DashboardConfig) -> Result<()> {
    let clients = upstream::Clients::new(&config)?;

    let addr: std::net::SocketAddr = config.server.bind.parse()?;
    let state = api::state::AppState::new(config, clients);
    let app = api::router(state);

    tracing::info!(%addr, "Phalanx dashboard listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
