//! Client for the report generator. Reports are named text blobs; content
//! is fetched on demand and never cached.

use serde::Deserialize;

use super::{ensure_success, normalize_base, UpstreamError};

const SERVICE: &str = "report";

#[derive(Deserialize)]
struct ReportListResponse {
    #[serde(default)]
    reports: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ReportClient {
    http: reqwest::Client,
    base: String,
}

impl ReportClient {
    pub fn new(http: reqwest::Client, base: &str) -> Self {
        Self {
            http,
            base: normalize_base(base),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Fetch the list of generated report names.
    pub async fn list(&self) -> Result<Vec<String>, UpstreamError> {
        let url = format!("{}/reports", self.base);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| UpstreamError::request(SERVICE, e))?;
        let body: ReportListResponse = ensure_success(SERVICE, response)?
            .json()
            .await
            .map_err(|e| UpstreamError::request(SERVICE, e))?;
        Ok(body.reports)
    }

    /// Fetch one report's raw text content.
    pub async fn fetch(&self, name: &str) -> Result<String, UpstreamError> {
        let url = format!("{}/reports/{}", self.base, name);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| UpstreamError::request(SERVICE, e))?;
        ensure_success(SERVICE, response)?
            .text()
            .await
            .map_err(|e| UpstreamError::request(SERVICE, e))
    }
}
