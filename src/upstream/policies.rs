//! Client for the policy store.

use super::{ensure_success, normalize_base, UpstreamError};
use crate::model::Policy;

const SERVICE: &str = "policy";

#[derive(Debug, Clone)]
pub struct PolicyClient {
    http: reqwest::Client,
    base: String,
}

impl PolicyClient {
    pub fn new(http: reqwest::Client, base: &str) -> Self {
        Self {
            http,
            base: normalize_base(base),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Fetch the full current list of configured policies.
    pub async fn list(&self) -> Result<Vec<Policy>, UpstreamError> {
        let url = format!("{}/policies", self.base);
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

    /// Create a new policy. The rule list is forwarded uninterpreted.
    pub async fn create(&self, policy: &Policy) -> Result<(), UpstreamError> {
        let url = format!("{}/policies", self.base);
        let response = self
            .http
            .post(&url)
            .json(policy)
            .send()
            .await
            .map_err(|e| UpstreamError::request(SERVICE, e))?;
        ensure_success(SERVICE, response)?;
        Ok(())
    }

    /// Delete a policy by id.
    pub async fn delete(&self, id: &str) -> Result<(), UpstreamError> {
        let url = format!("{}/policies/{}", self.base, id);
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
