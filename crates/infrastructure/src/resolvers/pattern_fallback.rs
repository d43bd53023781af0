use sidecar_relay_application::ports::ResolverStrategy;
use sidecar_relay_domain::{canonical_port_suffix, RequestMetadata, ServiceEndpoint};

/// Last resort: treat the decoded service name as a resolvable hostname, or as a name under
/// the ingress domain when one is configured and the name is bare.
pub struct PatternFallbackStrategy {
    ingress_domain: Option<String>,
}

impl PatternFallbackStrategy {
    pub const NAME: &'static str = "pattern-fallback";

    pub fn new(ingress_domain: Option<String>) -> Self {
        let ingress_domain = ingress_domain
            .map(|d| d.trim().trim_end_matches('.').to_string())
            .filter(|d| !d.is_empty());
        Self { ingress_domain }
    }
}

impl ResolverStrategy for PatternFallbackStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn resolve(&self, host: &str, _url: &str, _metadata: &mut RequestMetadata) -> Option<String> {
        let endpoint = ServiceEndpoint::decode(host).ok()?;

        if let Some(domain) = &self.ingress_domain {
            if !endpoint.service_name.contains('.') {
                return Some(format!("https://{}.{}", endpoint.service_name, domain));
            }
        }

        Some(format!(
            "{}://{}{}",
            endpoint.protocol,
            endpoint.service_name,
            canonical_port_suffix(endpoint.protocol, endpoint.target_port())
        ))
    }
}
