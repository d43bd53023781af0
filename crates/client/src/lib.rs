//! Sidecar Relay client library
//!
//! Linked into each service. At startup it allocates ports for unbound listeners, registers
//! them with the sidecar proxy and hands out a [`TransportFactory`] whose clients send every
//! non-exempt outbound call through the proxy.

pub mod discovery;
pub mod environment;
pub mod registration;
pub mod sidecar;
pub mod transport;

pub use environment::{EnvironmentDetector, FixedEnvironment, ProcfsDetector};
pub use registration::{Listener, RegistrationClient, HTTPS_PORT_BASE, HTTP_PORT_BASE};
pub use sidecar::{SidecarClient, SidecarHandle};
pub use transport::{
    parse_request, InterceptingTransport, OutboundResponse, ReqwestTransport, Transport,
    TransportFactory,
};
