mod client;
mod errors;
mod logging;
mod resolver;
mod root;
mod server;

pub use client::{ClientConfig, ENV_DOCKER, ENV_NATIVE};
pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use resolver::{GatewayConfig, ResolverConfig};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
