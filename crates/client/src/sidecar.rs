use sidecar_relay_application::ports::PortProbe;
use sidecar_relay_application::services::{
    DoNotProxyEntry, DoNotProxyList, OutboundRewriter, PortAllocator,
};
use sidecar_relay_domain::ClientConfig;
use sidecar_relay_infrastructure::system::TcpPortProbe;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::discovery::{discover_host_ip, ProxyHostResolver};
use crate::environment::{EnvironmentDetector, ProcfsDetector};
use crate::registration::{Listener, RegistrationClient};
use crate::transport::{ReqwestTransport, Transport, TransportFactory};

/// Startup sequence of the client library.
pub struct SidecarClient {
    config: ClientConfig,
    detector: Arc<dyn EnvironmentDetector>,
    direct: Arc<dyn Transport>,
    probe: Arc<dyn PortProbe>,
    proxy_host: ProxyHostResolver,
    do_not_proxy: DoNotProxyList,
}

pub struct SidecarHandle {
    pub transports: TransportFactory,
    pub proxy_host: String,
    /// Detached registration task, `None` when registration is disabled here.
    pub registration: Option<JoinHandle<()>>,
}

impl SidecarClient {
    pub fn new(config: ClientConfig) -> Self {
        let proxy_host = ProxyHostResolver::new(config.proxy_hostname.clone());
        let do_not_proxy = parse_do_not_proxy(&config.do_not_proxy);
        Self {
            config,
            detector: Arc::new(ProcfsDetector::new()),
            direct: Arc::new(ReqwestTransport::new()),
            probe: Arc::new(TcpPortProbe::new()),
            proxy_host,
            do_not_proxy,
        }
    }

    pub fn with_detector(mut self, detector: Arc<dyn EnvironmentDetector>) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.direct = transport;
        self
    }

    pub fn with_port_probe(mut self, probe: Arc<dyn PortProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn with_proxy_host_resolver(mut self, resolver: ProxyHostResolver) -> Self {
        self.proxy_host = resolver;
        self
    }

    pub fn with_do_not_proxy_predicate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.do_not_proxy = self.do_not_proxy.with_predicate(predicate);
        self
    }

    /// Allocates ports for unbound `listeners` (writing them back), spawns registration in the
    /// background and returns the transports the service should use. Never fails: every
    /// registration problem is logged and the service keeps going.
    pub async fn start(self, listeners: &mut [Listener]) -> SidecarHandle {
        let environment = self.detector.label();
        let proxy_host = self.proxy_host.resolve().await.to_string();
        let register = self.config.should_register(environment);
        let intercept = self.config.should_proxy(environment);
        let proxy_addr = format!("{}:{}", proxy_host, self.config.proxy_port);

        info!(
            service = %self.config.service_name,
            environment,
            proxy = %proxy_addr,
            register,
            intercept,
            "Starting sidecar client"
        );

        let registration = if register {
            let client = RegistrationClient::new(
                self.config.service_name.clone(),
                proxy_host.clone(),
                self.config.proxy_port,
                self.direct.clone(),
                PortAllocator::new(self.probe.clone()),
            );
            let endpoints = client.advertise(listeners).await;
            let host_ip = self.config.host_ip.clone();
            let containerized = self.detector.is_containerized();

            Some(tokio::spawn(async move {
                if endpoints.is_empty() {
                    warn!("No endpoints to register");
                    return;
                }
                let ip = match discover_host_ip(host_ip.as_deref(), containerized) {
                    Ok(ip) => ip,
                    Err(e) => {
                        error!(error = %e, "Cannot determine host IP, skipping registration");
                        return;
                    }
                };
                if let Err(e) = client.register(&endpoints, &ip).await {
                    error!(error = %e, "Failed to register with proxy");
                }
            }))
        } else {
            None
        };

        let transports = if intercept {
            info!(proxy = %proxy_addr, "Outbound calls routed through sidecar");
            TransportFactory::intercepting(
                self.direct,
                OutboundRewriter::new(
                    proxy_host.clone(),
                    self.config.proxy_port,
                    self.config.service_name,
                    self.do_not_proxy,
                ),
            )
        } else {
            TransportFactory::direct(self.direct)
        };

        SidecarHandle {
            transports,
            proxy_host,
            registration,
        }
    }
}

/// Invalid entries are dropped with a warning rather than failing startup.
fn parse_do_not_proxy(raw: &[String]) -> DoNotProxyList {
    let mut list = DoNotProxyList::new();
    for entry in raw {
        match DoNotProxyEntry::parse(entry) {
            Ok(parsed) => list.push(parsed),
            Err(e) => warn!(entry = %entry, error = %e, "Ignoring do-not-proxy entry"),
        }
    }
    list
}
