use super::{OutboundResponse, Transport};
use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue};
use sidecar_relay_domain::{DomainError, OutboundRequest};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Dispatches requests exactly as described, with no rewriting.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .pool_max_idle_per_host(8)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self { client }
    }

    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: OutboundRequest) -> Result<OutboundResponse, DomainError> {
        let url = request.href.clone().unwrap_or_else(|| request.url());
        let method = reqwest::Method::from_bytes(request.method.to_ascii_uppercase().as_bytes())
            .map_err(|e| DomainError::Transport(format!("invalid method: {}", e)))?;

        let mut builder = self.client.request(method, &url);
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| DomainError::Transport(format!("invalid header name: {}", e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| DomainError::Transport(format!("invalid header value: {}", e)))?;
            builder = builder.header(name, value);
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        debug!(url = %url, "Sending outbound request");

        let response = builder
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("request to {} failed: {}", url, e)))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::Transport(format!("reading {} failed: {}", url, e)))?
            .to_vec();

        Ok(OutboundResponse {
            status,
            headers,
            body,
        })
    }

    fn name(&self) -> &'static str {
        "direct"
    }
}
