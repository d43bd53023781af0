use crate::host_pattern::Protocol;

/// Target descriptor of an outbound call, rewritten in place before dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: String,
    pub protocol: Protocol,
    pub host: Option<String>,
    /// Alternative spelling of `host`; only consulted when `host` is absent.
    pub hostname: Option<String>,
    pub port: Option<u16>,
    /// Path and query, always starting with `/`.
    pub path: String,
    pub headers: Vec<(String, String)>,
    /// Precomputed full URL, kept consistent with the fields above when present.
    pub href: Option<String>,
    pub body: Vec<u8>,
}

impl OutboundRequest {
    pub fn new(
        method: impl Into<String>,
        protocol: Protocol,
        host: impl Into<String>,
        port: Option<u16>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            method: method.into(),
            protocol,
            host: Some(host.into()),
            hostname: None,
            port,
            path: normalize_path(path.into()),
            headers: vec![],
            href: None,
            body: vec![],
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Moves `hostname` into `host` when only the former is set.
    pub fn normalize(&mut self) {
        if self.host.is_none() {
            self.host = self.hostname.clone();
        }
        self.path = normalize_path(std::mem::take(&mut self.path));
    }

    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or_else(|| self.protocol.default_port())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Replaces every existing value of `name`.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
    }

    /// The URL this request currently targets.
    pub fn url(&self) -> String {
        let host = self.host.as_deref().unwrap_or("localhost");
        let host = if host.contains(':') && !host.starts_with('[') {
            format!("[{}]", host)
        } else {
            host.to_string()
        };
        format!(
            "{}://{}:{}{}",
            self.protocol,
            host,
            self.effective_port(),
            self.path
        )
    }
}

fn normalize_path(path: String) -> String {
    if path.starts_with('/') {
        path
    } else {
        format!("/{}", path)
    }
}
