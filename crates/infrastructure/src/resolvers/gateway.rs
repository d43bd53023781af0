use sidecar_relay_application::ports::ResolverStrategy;
use sidecar_relay_domain::config::GatewayConfig;
use sidecar_relay_domain::{RequestMetadata, RequestOrigin, ServiceEndpoint};
use std::sync::Arc;
use tracing::debug;

/// Requests relayed by an external API gateway name their service in the first path segment.
/// The segment is turned into a synthesized host and handed to `inner`; on a hit the remaining
/// path replaces the inbound one and the request is tagged as gateway-originated.
pub struct GatewayStrategy {
    config: GatewayConfig,
    inner: Arc<dyn ResolverStrategy>,
}

impl GatewayStrategy {
    pub const NAME: &'static str = "gateway";

    pub fn new(config: GatewayConfig, inner: Arc<dyn ResolverStrategy>) -> Self {
        Self { config, inner }
    }

    fn synthesize_host(&self, service: &str) -> String {
        ServiceEndpoint::new(
            self.config.protocol,
            format!("{}{}", service, self.config.service_suffix),
            self.config.port,
        )
        .encode()
    }
}

impl ResolverStrategy for GatewayStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn resolve(&self, _host: &str, url: &str, metadata: &mut RequestMetadata) -> Option<String> {
        if !metadata.gateway_marker {
            return None;
        }

        let (service, remaining) = split_first_segment(url)?;
        let synthesized = self.synthesize_host(service);
        let target = self.inner.resolve(&synthesized, &remaining, metadata)?;

        debug!(
            service = %service,
            synthesized = %synthesized,
            path = %remaining,
            "Gateway request rewritten"
        );
        metadata.rewritten_path = Some(remaining);
        metadata.origin = RequestOrigin::Gateway;
        Some(target)
    }
}

/// `/orders/v1/items?x=1` → `("orders", "/v1/items?x=1")`. `None` when there is no segment.
fn split_first_segment(url: &str) -> Option<(&str, String)> {
    let trimmed = url.strip_prefix('/').unwrap_or(url);
    let (path, query) = match trimmed.find('?') {
        Some(idx) => (&trimmed[..idx], &trimmed[idx..]),
        None => (trimmed, ""),
    };

    let (service, rest) = match path.find('/') {
        Some(idx) => (&path[..idx], &path[idx..]),
        None => (path, ""),
    };
    if service.is_empty() {
        return None;
    }

    let rest = if rest.is_empty() { "/" } else { rest };
    Some((service, format!("{}{}", rest, query)))
}
