use super::{InterceptingTransport, ReqwestTransport, Transport};
use sidecar_relay_application::services::OutboundRewriter;
use std::sync::Arc;

/// Where services get their outbound clients from. Cheap to clone.
#[derive(Clone)]
pub struct TransportFactory {
    client: Arc<dyn Transport>,
    direct: Arc<dyn Transport>,
    intercepting: bool,
}

impl TransportFactory {
    pub fn direct(transport: Arc<dyn Transport>) -> Self {
        Self {
            client: transport.clone(),
            direct: transport,
            intercepting: false,
        }
    }

    pub fn intercepting(direct: Arc<dyn Transport>, rewriter: OutboundRewriter) -> Self {
        let client = Arc::new(InterceptingTransport::new(
            direct.clone(),
            Arc::new(rewriter),
        ));
        Self {
            client,
            direct,
            intercepting: true,
        }
    }

    /// The transport application code should use.
    pub fn client(&self) -> Arc<dyn Transport> {
        self.client.clone()
    }

    /// Bypasses interception.
    pub fn direct_client(&self) -> Arc<dyn Transport> {
        self.direct.clone()
    }

    pub fn is_intercepting(&self) -> bool {
        self.intercepting
    }
}

impl Default for TransportFactory {
    fn default() -> Self {
        Self::direct(Arc::new(ReqwestTransport::new()))
    }
}
