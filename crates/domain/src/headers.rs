//! Header names shared by the client interceptor, the resolver chain and the registration
//! endpoint. Client and proxy evolve independently, so these are the wire contract.

/// Carries the encoded HostPattern of the real destination.
pub const ENCODED_HOST_HEADER: &str = "host";

/// Name of the service that issued an outbound call. Stripped before forwarding.
pub const SOURCE_HEADER: &str = "x-source-service";

/// Externally reachable IP of a registering service.
pub const ORIGIN_IP_HEADER: &str = "x-forwarded-for";

/// Proxy-added headers removed before a request leaves for its backend.
pub const FORWARDED_HEADERS: [&str; 4] = [
    "x-forwarded-for",
    "x-forwarded-port",
    "x-forwarded-proto",
    "x-forwarded-host",
];

pub const HOP_BY_HOP_HEADERS: [&str; 6] = [
    "connection",
    "keep-alive",
    "proxy-connection",
    "te",
    "transfer-encoding",
    "upgrade",
];

/// Host value under which the proxy serves its own registration API.
pub const REGISTRATION_HOST: &str = "container-proxy";
