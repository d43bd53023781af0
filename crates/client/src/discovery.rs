use sidecar_relay_domain::headers::REGISTRATION_HOST;
use sidecar_relay_domain::DomainError;
use sidecar_relay_infrastructure::system::host_lookup;
use std::net::IpAddr;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// Name the sidecar is reachable under on a container network.
pub const SIDECAR_HOSTNAME: &str = REGISTRATION_HOST;
pub const LOOPBACK_HOSTNAME: &str = "localhost";
pub const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(2);

/// Alias desktop container runtimes give the host machine.
pub const DESKTOP_HOST_ALIAS: &str = "host.docker.internal";

/// Resolves the proxy hostname once and remembers it for the process lifetime.
pub struct ProxyHostResolver {
    configured: Option<String>,
    candidate: String,
    timeout: Duration,
    resolved: OnceCell<String>,
}

impl ProxyHostResolver {
    pub fn new(configured: Option<String>) -> Self {
        Self {
            configured,
            candidate: SIDECAR_HOSTNAME.to_string(),
            timeout: DISCOVERY_TIMEOUT,
            resolved: OnceCell::new(),
        }
    }

    pub fn with_candidate(mut self, candidate: impl Into<String>) -> Self {
        self.candidate = candidate.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn resolve(&self) -> &str {
        self.resolved
            .get_or_init(|| async {
                if let Some(host) = &self.configured {
                    return host.clone();
                }
                match host_lookup::resolve_all(&self.candidate, 0, self.timeout).await {
                    Ok(_) => {
                        info!(host = %self.candidate, "Sidecar hostname resolves");
                        self.candidate.clone()
                    }
                    Err(e) => {
                        debug!(host = %self.candidate, error = %e, "Sidecar hostname does not resolve");
                        LOOPBACK_HOSTNAME.to_string()
                    }
                }
            })
            .await
    }
}

/// Externally reachable address of this host, in order: explicit override, the desktop
/// runtime alias (native processes on macOS/Windows), first non-loopback IPv4 interface.
pub fn discover_host_ip(override_ip: Option<&str>, containerized: bool) -> Result<String, DomainError> {
    let alias = (!containerized && cfg!(any(target_os = "macos", target_os = "windows")))
        .then_some(DESKTOP_HOST_ALIAS);

    let interfaces = match local_ip_address::list_afinet_netifas() {
        Ok(list) => list,
        Err(e) => {
            warn!(error = %e, "Failed to list network interfaces");
            vec![]
        }
    };

    select_host_ip(override_ip, alias, &interfaces)
}

pub fn select_host_ip(
    override_ip: Option<&str>,
    alias: Option<&str>,
    interfaces: &[(String, IpAddr)],
) -> Result<String, DomainError> {
    if let Some(ip) = override_ip.map(str::trim).filter(|ip| !ip.is_empty()) {
        return Ok(ip.to_string());
    }
    if let Some(alias) = alias {
        return Ok(alias.to_string());
    }

    interfaces
        .iter()
        .find(|(_, ip)| ip.is_ipv4() && !ip.is_loopback() && !ip.is_unspecified())
        .map(|(name, ip)| {
            debug!(interface = %name, ip = %ip, "Host IP discovered");
            ip.to_string()
        })
        .ok_or(DomainError::NoInterfaceFound)
}
