use sidecar_relay_application::ports::{ResolverStrategy, ServiceRegistry};
use sidecar_relay_domain::{RequestMetadata, ServiceEndpoint};
use std::sync::Arc;

pub struct RegistryLookupStrategy {
    registry: Arc<dyn ServiceRegistry>,
}

impl RegistryLookupStrategy {
    pub const NAME: &'static str = "registry";

    pub fn new(registry: Arc<dyn ServiceRegistry>) -> Self {
        Self { registry }
    }
}

impl ResolverStrategy for RegistryLookupStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn resolve(&self, host: &str, _url: &str, _metadata: &mut RequestMetadata) -> Option<String> {
        if let Some(url) = self.registry.lookup(host) {
            return Some(url.to_string());
        }

        // Entries are keyed without the private-port suffix.
        let endpoint = ServiceEndpoint::decode(host).ok()?;
        if endpoint.private_port.is_none() {
            return None;
        }
        self.registry
            .lookup(&endpoint.registry_key())
            .map(|url| url.to_string())
    }
}
