use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::Arc;

use crate::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Protocol::Http => 80,
            Protocol::Https => 443,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_end_matches(':').to_ascii_lowercase().as_str() {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            other => Err(DomainError::InvalidPattern(format!(
                "unsupported protocol '{}'",
                other
            ))),
        }
    }
}

/// Empty for `(http, 80)` and `(https, 443)`, `":{port}"` otherwise.
pub fn canonical_port_suffix(protocol: Protocol, port: u16) -> String {
    if port == protocol.default_port() {
        String::new()
    } else {
        format!(":{}", port)
    }
}

/// Formats a backend URL, bracketing IPv6 literals.
pub fn backend_url(protocol: Protocol, host: &str, port: u16) -> String {
    match host.parse::<IpAddr>() {
        Ok(IpAddr::V6(v6)) => format!("{}://[{}]:{}", protocol, v6, port),
        _ => format!("{}://{}:{}", protocol, host, port),
    }
}

/// One thing a service wants reachable through the proxy.
///
/// Wire form is `{protocol}.{service}.{public_port}[-{private_port}]`. The service name may
/// itself contain dots; only the trailing numeric group is treated as ports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServiceEndpoint {
    pub protocol: Protocol,
    pub service_name: Arc<str>,
    pub public_port: u16,
    pub private_port: Option<u16>,
}

impl ServiceEndpoint {
    pub fn new(protocol: Protocol, service_name: impl Into<Arc<str>>, public_port: u16) -> Self {
        Self {
            protocol,
            service_name: service_name.into(),
            public_port,
            private_port: None,
        }
    }

    /// A private port equal to the public one is dropped, it carries no information.
    pub fn with_private_port(mut self, private_port: u16) -> Self {
        self.private_port = (private_port != self.public_port).then_some(private_port);
        self
    }

    /// The port the backend actually listens on.
    pub fn target_port(&self) -> u16 {
        self.private_port.unwrap_or(self.public_port)
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }

    pub fn decode(pattern: &str) -> Result<Self, DomainError> {
        pattern.parse()
    }

    /// The pattern without its private-port suffix; this is what the registry is keyed by.
    pub fn registry_key(&self) -> String {
        format!(
            "{}.{}.{}",
            self.protocol, self.service_name, self.public_port
        )
    }

    pub fn validate_service_name(name: &str) -> Result<(), String> {
        if name.is_empty() {
            return Err("Service name cannot be empty".to_string());
        }
        if name.starts_with('.') || name.ends_with('.') {
            return Err(format!("Service name '{}' has a leading or trailing dot", name));
        }
        if name.chars().any(|c| c.is_whitespace() || c == '/' || c == ':') {
            return Err(format!("Service name '{}' contains invalid characters", name));
        }
        Ok(())
    }
}

impl fmt::Display for ServiceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            self.protocol, self.service_name, self.public_port
        )?;
        match self.private_port {
            Some(private) if private != self.public_port => write!(f, "-{}", private),
            _ => Ok(()),
        }
    }
}

fn parse_port(s: &str, pattern: &str) -> Result<u16, DomainError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::InvalidPattern(pattern.to_string()));
    }
    match s.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(DomainError::InvalidPattern(format!(
            "{} (port '{}' out of range)",
            pattern, s
        ))),
    }
}

impl FromStr for ServiceEndpoint {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidPattern(s.to_string());

        let (protocol, rest) = if let Some(rest) = s.strip_prefix("https.") {
            (Protocol::Https, rest)
        } else if let Some(rest) = s.strip_prefix("http.") {
            (Protocol::Http, rest)
        } else {
            return Err(invalid());
        };

        let (service_name, ports) = rest.rsplit_once('.').ok_or_else(invalid)?;
        if service_name.is_empty() {
            return Err(invalid());
        }

        let (public_port, private_port) = match ports.split_once('-') {
            Some((public, private)) => (parse_port(public, s)?, Some(parse_port(private, s)?)),
            None => (parse_port(ports, s)?, None),
        };

        let endpoint = ServiceEndpoint::new(protocol, service_name, public_port);
        Ok(match private_port {
            Some(private) => endpoint.with_private_port(private),
            None => endpoint,
        })
    }
}
