pub mod host_lookup;
mod port_probe;

pub use port_probe::{TcpPortProbe, DEFAULT_PROBE_TIMEOUT};
