mod direct;
mod factory;
mod intercept;

use async_trait::async_trait;
use sidecar_relay_domain::{DomainError, OutboundRequest, Protocol};

pub use direct::{ReqwestTransport, DEFAULT_TIMEOUT};
pub use factory::TransportFactory;
pub use intercept::InterceptingTransport;

#[derive(Debug, Clone)]
pub struct OutboundResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl OutboundResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Sends one outbound HTTP exchange. Services obtain implementations from a
/// [`TransportFactory`] instead of building their own clients.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: OutboundRequest) -> Result<OutboundResponse, DomainError>;

    fn name(&self) -> &'static str;
}

/// Builds a request from an absolute `http`/`https` URL, keeping it as the precomputed href.
pub fn parse_request(method: &str, raw_url: &str) -> Result<OutboundRequest, DomainError> {
    let url = url::Url::parse(raw_url)
        .map_err(|e| DomainError::Transport(format!("invalid URL '{}': {}", raw_url, e)))?;

    let protocol: Protocol = url.scheme().parse().map_err(|_| {
        DomainError::Transport(format!("unsupported scheme '{}'", url.scheme()))
    })?;
    let host = url
        .host_str()
        .ok_or_else(|| DomainError::Transport(format!("URL '{}' has no host", raw_url)))?;

    let path = match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    };

    let mut request = OutboundRequest::new(method, protocol, host, url.port(), path);
    request.href = Some(url.to_string());
    Ok(request)
}
