use serde::{Deserialize, Serialize};

use crate::headers::REGISTRATION_HOST;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port every service talks to; inbound traffic is resolved and forwarded from here.
    #[serde(default = "default_proxy_port")]
    pub proxy_port: u16,

    /// Standalone listener for the registration API. 0 disables it; the API stays reachable
    /// on the proxy port through `registration_host`.
    #[serde(default)]
    pub web_port: u16,

    #[serde(default = "default_registration_host")]
    pub registration_host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            proxy_port: default_proxy_port(),
            web_port: 0,
            registration_host: default_registration_host(),
        }
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

pub fn default_proxy_port() -> u16 {
    9990
}

pub fn default_registration_host() -> String {
    REGISTRATION_HOST.to_string()
}
