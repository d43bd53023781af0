use serde::{Deserialize, Serialize};

use super::server::default_proxy_port;

/// Runtime environment labels accepted by `register_in` / `proxy_in`.
pub const ENV_DOCKER: &str = "docker";
pub const ENV_NATIVE: &str = "native";

/// Settings of the library linked into each service. Immutable once the client has started.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClientConfig {
    pub service_name: String,

    /// Unset means: probe the well-known sidecar name, then fall back to loopback.
    #[serde(default)]
    pub proxy_hostname: Option<String>,

    #[serde(default = "default_proxy_port")]
    pub proxy_port: u16,

    /// Environments in which to register. Empty means always.
    #[serde(default)]
    pub register_in: Vec<String>,

    /// Environments in which to intercept outbound calls. Empty means always.
    #[serde(default)]
    pub proxy_in: Vec<String>,

    /// Raw do-not-proxy entries: literals, `*` globs or `/regex/`.
    #[serde(default)]
    pub do_not_proxy: Vec<String>,

    /// Externally reachable IP to advertise instead of the discovered one.
    #[serde(default)]
    pub host_ip: Option<String>,
}

impl ClientConfig {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            proxy_hostname: None,
            proxy_port: default_proxy_port(),
            register_in: vec![],
            proxy_in: vec![],
            do_not_proxy: vec![],
            host_ip: None,
        }
    }

    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }

    /// Builds the config from `lookup`; `SERVICE_NAME` overrides `service_name`.
    /// An unparseable `PROXY_PORT` keeps the default rather than failing the service.
    pub fn from_lookup<F>(service_name: impl Into<String>, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::new(service_name);
        if let Some(name) = non_empty("SERVICE_NAME") {
            config.service_name = name;
        }
        config.proxy_hostname = non_empty("PROXY_HOSTNAME");
        if let Some(port) = non_empty("PROXY_PORT").and_then(|p| p.parse::<u16>().ok()) {
            if port != 0 {
                config.proxy_port = port;
            }
        }
        config.register_in = split_list(non_empty("PROXY_REGISTER_IN"));
        config.proxy_in = split_list(non_empty("PROXY_PROXY_IN"));
        config.do_not_proxy = split_list(non_empty("PROXY_DO_NOT_PROXY"));
        config.host_ip = non_empty("PROXY_HOST_IP");
        config
    }

    pub fn should_register(&self, environment: &str) -> bool {
        allows(&self.register_in, environment)
    }

    pub fn should_proxy(&self, environment: &str) -> bool {
        allows(&self.proxy_in, environment)
    }
}

fn split_list(raw: Option<String>) -> Vec<String> {
    raw.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

fn allows(list: &[String], environment: &str) -> bool {
    list.is_empty() || list.iter().any(|e| e.eq_ignore_ascii_case(environment))
}
