use sidecar_relay_domain::RequestMetadata;

/// One way of turning an inbound Host value into a backend URL.
///
/// Runs inline on every inbound request, so implementations must not block on I/O.
/// `metadata` may be updated (path rewrite, origin tag) only when a target is returned.
pub trait ResolverStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    fn resolve(&self, host: &str, url: &str, metadata: &mut RequestMetadata) -> Option<String>;
}
