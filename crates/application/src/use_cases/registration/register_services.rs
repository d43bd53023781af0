use sidecar_relay_domain::{backend_url, ServiceEndpoint};
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::ports::ServiceRegistry;

pub struct RegisterServicesUseCase {
    registry: Arc<dyn ServiceRegistry>,
}

impl RegisterServicesUseCase {
    pub fn new(registry: Arc<dyn ServiceRegistry>) -> Self {
        Self { registry }
    }

    /// Registers every well-formed pattern in `services` against `source_ip` and returns the
    /// pattern→URL pairs actually stored. Malformed entries are skipped one by one; a missing
    /// source IP skips the whole batch. Neither is an error for the caller.
    #[instrument(skip(self, services), fields(count = services.len()))]
    pub fn execute(&self, services: &[String], source_ip: Option<&str>) -> BTreeMap<String, String> {
        let mut registered = BTreeMap::new();

        let Some(ip) = source_ip.and_then(parse_source_ip) else {
            warn!(
                services = ?services,
                "Registration carries no source IP, skipping all entries"
            );
            return registered;
        };

        for pattern in services {
            let endpoint = match ServiceEndpoint::decode(pattern) {
                Ok(endpoint) => endpoint,
                Err(e) => {
                    warn!(pattern = %pattern, error = %e, "Skipping malformed service pattern");
                    continue;
                }
            };

            if let Err(reason) = ServiceEndpoint::validate_service_name(&endpoint.service_name) {
                warn!(pattern = %pattern, reason = %reason, "Skipping invalid service name");
                continue;
            }

            let key = endpoint.registry_key();
            let url = backend_url(endpoint.protocol, &ip, endpoint.target_port());
            self.registry.register(&key, &url);

            info!(pattern = %key, url = %url, "Service registered");
            registered.insert(key, url);
        }

        registered
    }
}

/// First entry of a (possibly comma-separated) forwarded-for value. IPv4-mapped IPv6
/// addresses are unwrapped; non-IP values such as desktop-runtime host aliases pass through.
pub fn parse_source_ip(raw: &str) -> Option<String> {
    let first = raw.split(',').next()?.trim();
    let first = first.trim_start_matches('[').trim_end_matches(']');
    if first.is_empty() || first.contains(char::is_whitespace) || first.contains('/') {
        return None;
    }

    match first.parse::<IpAddr>() {
        Ok(IpAddr::V6(v6)) => Some(match v6.to_ipv4_mapped() {
            Some(v4) => v4.to_string(),
            None => v6.to_string(),
        }),
        Ok(ip) => Some(ip.to_string()),
        Err(_) => Some(first.to_string()),
    }
}
