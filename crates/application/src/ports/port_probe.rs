use async_trait::async_trait;
use sidecar_relay_domain::DomainError;

#[async_trait]
pub trait PortProbe: Send + Sync {
    /// `Ok(false)` when the port is taken (or the probe timed out), `Err` for any other
    /// bind failure. Never reserves the port.
    async fn is_available(&self, port: u16) -> Result<bool, DomainError>;
}
