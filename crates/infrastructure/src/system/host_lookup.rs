use sidecar_relay_domain::DomainError;
use std::net::SocketAddr;
use std::time::Duration;

/// Resolves a hostname to all its addresses through the system resolver.
pub async fn resolve_all(
    hostname: &str,
    port: u16,
    timeout: Duration,
) -> Result<Vec<SocketAddr>, DomainError> {
    let target = format!("{}:{}", hostname, port);

    let addrs: Vec<SocketAddr> = tokio::time::timeout(timeout, tokio::net::lookup_host(&target))
        .await
        .map_err(|_| DomainError::Transport(format!("DNS lookup for {} timed out", target)))?
        .map_err(|e| DomainError::Transport(format!("DNS lookup for {} failed: {}", target, e)))?
        .collect();

    if addrs.is_empty() {
        return Err(DomainError::Transport(format!(
            "No addresses found for {}",
            target
        )));
    }

    Ok(addrs)
}
