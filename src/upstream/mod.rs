//! Typed clients for the backend services the dashboard renders from.
//!
//! Every call is a direct pass-through: no retry, no caching, no auth
//! headers. Failures carry the service name so the log line says which
//! backend misbehaved.

pub mod anomalies;
pub mod connectors;
pub mod policies;
pub mod reports;

pub use anomalies::AnomalyClient;
pub use connectors::ConnectorClient;
pub use policies::PolicyClient;
pub use reports::ReportClient;

use std::time::Duration;

use anyhow::Result;
use thiserror::Error;

use crate::config::DashboardConfig;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("call to {service} service failed: {source}")]
    Request {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} service returned {status}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
    },

    #[error("websocket connect to {url} failed: {source}")]
    Feed {
        url: String,
        #[source]
        source: tokio_tungstenite::tungstenite::Error,
    },
}

impl UpstreamError {
    pub(crate) fn request(service: &'static str, source: reqwest::Error) -> Self {
        Self::Request { service, source }
    }
}

/// Check a response status, mapping non-2xx to an error.
pub(crate) fn ensure_success(
    service: &'static str,
    response: reqwest::Response,
) -> Result<reqwest::Response, UpstreamError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(UpstreamError::Status { service, status })
    }
}

/// One client per backend service, sharing a single HTTP connection pool.
#[derive(Debug, Clone)]
pub struct Clients {
    pub anomalies: AnomalyClient,
    pub reports: ReportClient,
    pub connectors: ConnectorClient,
    pub policies: PolicyClient,
}

impl Clients {
    /// Build the client set from the configured base URLs.
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream.request_timeout_sec))
            .build()?;

        Ok(Self {
            anomalies: AnomalyClient::new(http.clone(), &config.upstream.anomaly_url),
            reports: ReportClient::new(http.clone(), &config.upstream.report_url),
            connectors: ConnectorClient::new(http.clone(), &config.upstream.connector_url),
            policies: PolicyClient::new(http, &config.upstream.policy_url),
        })
    }
}

/// Strip a trailing slash so `{base}/path` formatting stays predictable.
pub(crate) fn normalize_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}
