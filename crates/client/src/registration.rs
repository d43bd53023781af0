use sidecar_relay_application::services::PortAllocator;
use sidecar_relay_domain::headers::{ORIGIN_IP_HEADER, REGISTRATION_HOST, SOURCE_HEADER};
use sidecar_relay_domain::{DomainError, OutboundRequest, Protocol, ServiceEndpoint};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::transport::Transport;

/// Public port advertised for allocated plaintext listeners; the allocation is the private suffix.
pub const HTTP_PORT_BASE: u16 = 8000;
pub const HTTPS_PORT_BASE: u16 = 8443;

/// One of the service's own listeners. `port` is `None` (or 0) until bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub protocol: Protocol,
    pub port: Option<u16>,
}

impl Listener {
    pub fn http(port: Option<u16>) -> Self {
        Self {
            protocol: Protocol::Http,
            port,
        }
    }

    pub fn https(port: Option<u16>) -> Self {
        Self {
            protocol: Protocol::Https,
            port,
        }
    }

    pub fn fixed_port(&self) -> Option<u16> {
        self.port.filter(|&p| p != 0)
    }
}

fn port_base(protocol: Protocol) -> u16 {
    match protocol {
        Protocol::Http => HTTP_PORT_BASE,
        Protocol::Https => HTTPS_PORT_BASE,
    }
}

pub struct RegistrationClient {
    service_name: String,
    proxy_host: String,
    proxy_port: u16,
    transport: Arc<dyn Transport>,
    allocator: PortAllocator,
}

impl RegistrationClient {
    /// `transport` must dispatch directly; registration never goes through interception.
    pub fn new(
        service_name: impl Into<String>,
        proxy_host: impl Into<String>,
        proxy_port: u16,
        transport: Arc<dyn Transport>,
        allocator: PortAllocator,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            proxy_host: proxy_host.into(),
            proxy_port,
            transport,
            allocator,
        }
    }

    /// Builds the endpoint list, allocating ports for unbound listeners and writing the
    /// allocation back. A listener whose allocation fails is left unbound and not advertised.
    #[instrument(skip(self, listeners), fields(service = %self.service_name))]
    pub async fn advertise(&self, listeners: &mut [Listener]) -> Vec<ServiceEndpoint> {
        let mut endpoints = Vec::with_capacity(listeners.len());

        for listener in listeners.iter_mut() {
            if let Some(port) = listener.fixed_port() {
                endpoints.push(ServiceEndpoint::new(
                    listener.protocol,
                    self.service_name.as_str(),
                    port,
                ));
                continue;
            }

            let base = port_base(listener.protocol);
            match self.allocator.find_port(base).await {
                Ok(port) => {
                    info!(protocol = %listener.protocol, port, "Allocated listener port");
                    listener.port = Some(port);
                    endpoints.push(
                        ServiceEndpoint::new(listener.protocol, self.service_name.as_str(), base)
                            .with_private_port(port),
                    );
                }
                Err(e) => {
                    error!(protocol = %listener.protocol, error = %e, "Port allocation failed, listener not advertised");
                }
            }
        }

        endpoints
    }

    /// POSTs the endpoints to the proxy and returns what it registered.
    #[instrument(skip(self, endpoints), fields(count = endpoints.len()))]
    pub async fn register(
        &self,
        endpoints: &[ServiceEndpoint],
        host_ip: &str,
    ) -> Result<BTreeMap<String, String>, DomainError> {
        let services: Vec<String> = endpoints.iter().map(ServiceEndpoint::encode).collect();
        let body = serde_json::to_vec(&serde_json::json!({ "services": services }))
            .map_err(|e| DomainError::Registration(e.to_string()))?;

        let request = OutboundRequest::new(
            "POST",
            Protocol::Http,
            self.proxy_host.as_str(),
            Some(self.proxy_port),
            "/register",
        )
        .with_header("host", REGISTRATION_HOST)
        .with_header(SOURCE_HEADER, self.service_name.as_str())
        .with_header(ORIGIN_IP_HEADER, host_ip)
        .with_header("content-type", "application/json")
        .with_body(body);

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(DomainError::Registration(format!(
                "proxy answered HTTP {}",
                response.status
            )));
        }

        let registered: BTreeMap<String, String> = serde_json::from_slice(&response.body)
            .map_err(|e| DomainError::Registration(format!("unexpected response: {}", e)))?;

        if registered.len() < services.len() {
            warn!(
                sent = services.len(),
                registered = registered.len(),
                "Proxy skipped some endpoints"
            );
        }
        info!(services = ?services, "Registered with proxy");
        Ok(registered)
    }
}
