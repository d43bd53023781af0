use super::{OutboundResponse, Transport};
use async_trait::async_trait;
use sidecar_relay_application::services::{OutboundRewriter, RewriteDecision};
use sidecar_relay_domain::{DomainError, OutboundRequest};
use std::sync::Arc;
use tracing::debug;

/// Rewrites each request towards the sidecar, then hands it to the wrapped transport.
/// The wrapped transport never sees this layer again, so registration traffic sent through
/// it directly cannot loop.
pub struct InterceptingTransport {
    direct: Arc<dyn Transport>,
    rewriter: Arc<OutboundRewriter>,
}

impl InterceptingTransport {
    pub fn new(direct: Arc<dyn Transport>, rewriter: Arc<OutboundRewriter>) -> Self {
        Self { direct, rewriter }
    }
}

#[async_trait]
impl Transport for InterceptingTransport {
    async fn send(&self, mut request: OutboundRequest) -> Result<OutboundResponse, DomainError> {
        match self.rewriter.rewrite(&mut request) {
            RewriteDecision::Proxied { encoded_host } => {
                debug!(encoded_host = %encoded_host, "Outbound call routed through sidecar");
            }
            RewriteDecision::Bypassed => {
                debug!(host = request.host.as_deref().unwrap_or("-"), "Outbound call bypasses sidecar");
            }
        }
        self.direct.send(request).await
    }

    fn name(&self) -> &'static str {
        "intercepting"
    }
}
