use sidecar_relay_domain::{DomainError, RequestMetadata};
use std::sync::Arc;
use tracing::debug;

use crate::services::{Resolution, ResolverChain};

/// Entry point the proxy engine calls for every inbound request.
pub struct ResolveUpstreamUseCase {
    chain: Arc<ResolverChain>,
}

impl ResolveUpstreamUseCase {
    pub fn new(chain: Arc<ResolverChain>) -> Self {
        Self { chain }
    }

    pub fn execute(
        &self,
        host: &str,
        url: &str,
        metadata: &mut RequestMetadata,
    ) -> Result<Resolution, DomainError> {
        let host = strip_port(host.trim());
        if host.is_empty() {
            return Err(DomainError::UpstreamNotFound(String::new()));
        }

        let result = self.chain.resolve(host, url, metadata);
        if let Err(ref e) = result {
            debug!(host = %host, source = metadata.source_or_unknown(), error = %e, "Resolution failed");
        }
        result
    }
}

/// Drops a trailing `:port` from a Host value. Bracketed IPv6 keeps its brackets.
pub fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, port))
            if !name.contains(':') && !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()) =>
        {
            name
        }
        _ => host,
    }
}
