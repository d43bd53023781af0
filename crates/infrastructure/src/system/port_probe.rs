use async_trait::async_trait;
use sidecar_relay_application::ports::PortProbe;
use sidecar_relay_domain::DomainError;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Probes a TCP port by binding and listening on it on all IPv4 interfaces, then closing.
///
/// The bind runs on the blocking pool. A probe that does not finish within `timeout` counts
/// as unavailable.
pub struct TcpPortProbe {
    timeout: Duration,
}

impl TcpPortProbe {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for TcpPortProbe {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PortProbe for TcpPortProbe {
    async fn is_available(&self, port: u16) -> Result<bool, DomainError> {
        let probe = tokio::task::spawn_blocking(move || try_bind(port));

        let outcome = match tokio::time::timeout(self.timeout, probe).await {
            Ok(joined) => joined.map_err(|e| DomainError::PortProbe {
                port,
                reason: e.to_string(),
            })?,
            Err(_) => {
                warn!(port, "Port probe timed out");
                return Ok(false);
            }
        };

        match outcome {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::AddrInUse => {
                debug!(port, "Port in use");
                Ok(false)
            }
            Err(e) => Err(DomainError::PortProbe {
                port,
                reason: e.to_string(),
            }),
        }
    }
}

fn try_bind(port: u16) -> io::Result<()> {
    let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))?;
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    socket.bind(&addr.into())?;
    socket.listen(1)?;
    Ok(())
}
