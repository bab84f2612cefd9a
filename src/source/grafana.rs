//! Grafana HTTP API client

use super::traits::DashboardSource;
use crate::config::{GrafanaConfig, REQUEST_TIMEOUT_SECS};
use crate::error::{Error, Result};
use crate::types::DashboardDescriptor;
use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

/// Client for the Grafana HTTP API
///
/// Every request carries the API key as a bearer token and is bounded by
/// [`REQUEST_TIMEOUT_SECS`].
#[derive(Clone, Debug)]
pub struct GrafanaClient {
    client: reqwest::Client,
    timeout: Duration,
    base_url: String,
    api_key: String,
    limit: u32,
}

impl GrafanaClient {
    /// Create a client for the instance described by `config`
    pub fn new(config: &GrafanaConfig) -> Result<Self> {
        let timeout = Duration::from_secs(REQUEST_TIMEOUT_SECS);

        Ok(Self {
            client: build_http_client(timeout)?,
            timeout,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            limit: config.limit,
        })
    }

    /// Replace the per-request timeout
    pub(crate) fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = build_http_client(timeout)?;
        self.timeout = timeout;
        Ok(self)
    }

    /// GET `<url>/api/<endpoint>` and return the response body
    ///
    /// Any status other than `200 OK` is turned into [`Error::Http`].
    pub async fn fetch(&self, endpoint: &str, params: &[(&str, String)]) -> Result<Vec<u8>> {
        let url = format!("{}/api/{}", self.base_url, endpoint);
        debug!(%url, "requesting dashboard API");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&self.api_key)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    debug!(%url, timeout = ?self.timeout, "request timed out");
                }
                Error::Network(e)
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::Http {
                status: status.as_u16(),
                endpoint: endpoint.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

#[async_trait]
impl DashboardSource for GrafanaClient {
    async fn search(&self) -> Result<Vec<DashboardDescriptor>> {
        let body = self
            .fetch("search", &[("limit", self.limit.to_string())])
            .await?;
        let descriptors: Vec<DashboardDescriptor> = serde_json::from_slice(&body)?;
        debug!(count = descriptors.len(), "search returned descriptors");
        Ok(descriptors)
    }

    async fn fetch_dashboard(&self, descriptor: &DashboardDescriptor) -> Result<Vec<u8>> {
        self.fetch(&descriptor.content_endpoint(), &[]).await
    }

    fn name(&self) -> &str {
        "grafana-http"
    }
}
