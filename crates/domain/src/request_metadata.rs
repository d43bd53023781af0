/// Where an inbound request came from, as far as resolution is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestOrigin {
    #[default]
    Direct,
    Gateway,
}

impl RequestOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestOrigin::Direct => "direct",
            RequestOrigin::Gateway => "gateway",
        }
    }
}

/// Request-scoped values carried alongside an inbound request through resolution and
/// forwarding. The request itself is never annotated.
#[derive(Debug, Clone, Default)]
pub struct RequestMetadata {
    /// Name of the calling service, taken from the source header.
    pub source: Option<String>,
    /// The upstream-gateway marker header was present on the request.
    pub gateway_marker: bool,
    pub origin: RequestOrigin,
    /// Path (and query) to forward instead of the inbound one.
    pub rewritten_path: Option<String>,
}

impl RequestMetadata {
    pub fn new(source: Option<String>, gateway_marker: bool) -> Self {
        Self {
            source,
            gateway_marker,
            ..Self::default()
        }
    }

    pub fn source_or_unknown(&self) -> &str {
        self.source.as_deref().unwrap_or("unknown")
    }
}
