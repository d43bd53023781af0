mod port_probe;
mod resolver_strategy;
mod service_registry;

pub use port_probe::PortProbe;
pub use resolver_strategy::ResolverStrategy;
pub use service_registry::ServiceRegistry;
