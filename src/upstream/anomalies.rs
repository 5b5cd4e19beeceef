//! Client for the anomaly detector: snapshot fetch plus the live push feed.

use serde::Deserialize;
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use super::{ensure_success, normalize_base, UpstreamError};
use crate::model::Anomaly;

const SERVICE: &str = "anomaly";

/// Upstream socket type returned by [`AnomalyClient::subscribe`].
pub type AnomalyFeed = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Deserialize)]
struct AnomalyListResponse {
    #[serde(default)]
    anomalies: Vec<Anomaly>,
}

#[derive(Debug, Clone)]
pub struct AnomalyClient {
    http: reqwest::Client,
    base: String,
}

impl AnomalyClient {
    pub fn new(http: reqwest::Client, base: &str) -> Self {
        Self {
            http,
            base: normalize_base(base),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Fetch the full current list of detected anomalies.
    pub async fn list(&self) -> Result<Vec<Anomaly>, UpstreamError> {
        let url = format!("{}/anomalies", self.base);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| UpstreamError::request(SERVICE, e))?;
        let body: AnomalyListResponse = ensure_success(SERVICE, response)?
            .json()
            .await
            .map_err(|e| UpstreamError::request(SERVICE, e))?;
        Ok(body.anomalies)
    }

    /// Derive the push-feed URL from the HTTP base.
    pub fn feed_url(&self) -> String {
        let ws_base = if let Some(rest) = self.base.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.base.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            self.base.clone()
        };
        format!("{ws_base}/ws/anomalies")
    }

    /// Open the upstream push feed. The caller owns the socket; dropping it
    /// releases the connection. No reconnection is attempted.
    pub async fn subscribe(&self) -> Result<AnomalyFeed, UpstreamError> {
        let url = self.feed_url();
        let (socket, _) = tokio_tungstenite::connect_async(url.as_str())
            .await
            .map_err(|source| UpstreamError::Feed { url, source })?;
        Ok(socket)
    }
}
