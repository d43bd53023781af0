use sidecar_relay_domain::headers::{ENCODED_HOST_HEADER, SOURCE_HEADER};
use sidecar_relay_domain::{OutboundRequest, Protocol, ServiceEndpoint};
use std::net::IpAddr;

use super::do_not_proxy::DoNotProxyList;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteDecision {
    /// Left untouched; dispatch to the real destination.
    Bypassed,
    /// Now targets the proxy, with the real destination in the encoded host header.
    Proxied { encoded_host: String },
}

/// The client-side rewrite decision. Pure and I/O-free: it runs inline on every outbound call.
#[derive(Debug, Clone)]
pub struct OutboundRewriter {
    proxy_host: String,
    proxy_port: u16,
    service_name: String,
    do_not_proxy: DoNotProxyList,
}

impl OutboundRewriter {
    pub fn new(
        proxy_host: impl Into<String>,
        proxy_port: u16,
        service_name: impl Into<String>,
        do_not_proxy: DoNotProxyList,
    ) -> Self {
        Self {
            proxy_host: proxy_host.into(),
            proxy_port,
            service_name: service_name.into(),
            do_not_proxy,
        }
    }

    pub fn proxy_host(&self) -> &str {
        &self.proxy_host
    }

    pub fn proxy_port(&self) -> u16 {
        self.proxy_port
    }

    pub fn rewrite(&self, request: &mut OutboundRequest) -> RewriteDecision {
        request.normalize();

        let host = match request.host.as_deref() {
            Some(host) if !host.is_empty() => host,
            _ => return RewriteDecision::Bypassed,
        };

        if is_ip_literal(host) || self.do_not_proxy.matches(host) {
            return RewriteDecision::Bypassed;
        }

        let encoded_host =
            ServiceEndpoint::new(request.protocol, host, request.effective_port()).encode();

        request.host = Some(self.proxy_host.clone());
        if request.hostname.is_some() {
            request.hostname = Some(self.proxy_host.clone());
        }
        request.port = Some(self.proxy_port);
        // The hop to the local sidecar is always plaintext; the sidecar re-encrypts if the
        // original protocol asked for it.
        request.protocol = Protocol::Http;
        request.set_header(ENCODED_HOST_HEADER, encoded_host.clone());
        request.set_header(SOURCE_HEADER, self.service_name.clone());
        if request.href.is_some() {
            request.href = Some(format!(
                "http://{}:{}{}",
                self.proxy_host, self.proxy_port, request.path
            ));
        }

        RewriteDecision::Proxied { encoded_host }
    }
}

/// Digit-and-dot IPv4 literals, plus anything that parses as an IPv6 address.
pub fn is_ip_literal(host: &str) -> bool {
    if host.bytes().all(|b| b.is_ascii_digit() || b == b'.') {
        return true;
    }
    host.trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .is_ok()
}
