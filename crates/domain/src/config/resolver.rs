use serde::{Deserialize, Serialize};

use crate::host_pattern::Protocol;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// DNS suffix under which bare service names are reachable without registration.
    #[serde(default)]
    pub ingress_domain: Option<String>,

    /// Seconds before a forwarded request to a backend is abandoned.
    #[serde(default = "default_upstream_timeout")]
    pub upstream_timeout: u64,

    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            ingress_domain: None,
            upstream_timeout: default_upstream_timeout(),
            gateway: GatewayConfig::default(),
        }
    }
}

/// Convention for requests arriving through an external API gateway: the first path segment
/// names the service, which is then looked up as `{protocol}.{segment}{service_suffix}.{port}`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_marker_header")]
    pub marker_header: String,

    #[serde(default = "default_gateway_protocol")]
    pub protocol: Protocol,

    #[serde(default = "default_gateway_port")]
    pub port: u16,

    #[serde(default = "default_service_suffix")]
    pub service_suffix: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            marker_header: default_marker_header(),
            protocol: default_gateway_protocol(),
            port: default_gateway_port(),
            service_suffix: default_service_suffix(),
        }
    }
}

fn default_upstream_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_marker_header() -> String {
    "x-gateway-upstream".to_string()
}

fn default_gateway_protocol() -> Protocol {
    Protocol::Http
}

fn default_gateway_port() -> u16 {
    8000
}

fn default_service_suffix() -> String {
    "-api".to_string()
}
