//! Client for the connector registry.

use super::{ensure_success, normalize_base, UpstreamError};
use crate::model::Connector;

const SERVICE: &str = "connector";

#[derive(Debug, Clone)]
pub struct ConnectorClient {
    http: reqwest::Client,
    base: String,
}

impl ConnectorClient {
    pub fn new(http: reqwest::Client, base: &str) -> Self {
        Self {
            http,
            base: normalize_base(base),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Fetch the full current list of registered connectors.
    pub async fn list(&self) -> Result<Vec<Connector>, UpstreamError> {
        let url = format!("{}/connectors", self.base);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| UpstreamError::request(SERVICE, e))?;
        ensure_success(SERVICE, response)?
            .json()
            .await
            .map_err(|e| UpstreamError::request(SERVICE, e))
    }

    /// Register a new connector. The payload is forwarded verbatim.
    pub async fn create(&self, connector: &Connector) -> Result<(), UpstreamError> {
        let url = format!("{}/connectors", self.base);
        let response = self
            .http
            .post(&url)
            .json(connector)
            .send()
            .await
            .map_err(|e| UpstreamError::request(SERVICE, e))?;
        ensure_success(SERVICE, response)?;
        Ok(())
    }

    /// Delete a connector by id.
    pub async fn delete(&self, id: &str) -> Result<(), UpstreamError> {
        let url = format!("{}/connectors/{}", self.base, id);
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| UpstreamError::request(SERVICE, e))?;
        ensure_success(SERVICE, response)?;
        Ok(())
    }
}
