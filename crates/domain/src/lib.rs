//! Sidecar Relay Domain Layer
pub mod config;
pub mod errors;
pub mod headers;
pub mod host_pattern;
pub mod outbound_request;
pub mod request_metadata;

pub use config::{CliOverrides, ClientConfig, Config, ConfigError};
pub use errors::DomainError;
pub use host_pattern::{backend_url, canonical_port_suffix, Protocol, ServiceEndpoint};
pub use outbound_request::OutboundRequest;
pub use request_metadata::{RequestMetadata, RequestOrigin};
