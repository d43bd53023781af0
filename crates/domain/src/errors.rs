use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid host pattern: {0}")]
    InvalidPattern(String),

    #[error("Registration request carries no source IP")]
    MissingSourceIp,

    #[error("Registration failed: {0}")]
    InternalRegistration(String),

    #[error("No upstream found for host '{0}'")]
    UpstreamNotFound(String),

    #[error("No free port in {start}..{end}")]
    AllocationExhausted { start: u16, end: u32 },

    #[error("No externally reachable network interface found")]
    NoInterfaceFound,

    #[error("Port probe failed on {port}: {reason}")]
    PortProbe { port: u16, reason: String },

    #[error("Outbound transport error: {0}")]
    Transport(String),

    #[error("Proxy registration error: {0}")]
    Registration(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
