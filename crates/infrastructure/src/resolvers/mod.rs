mod builder;
mod gateway;
mod pattern_fallback;
mod registry_lookup;

pub use builder::{
    ResolverChainBuilder, GATEWAY_PRIORITY, PATTERN_FALLBACK_PRIORITY, REGISTRY_PRIORITY,
};
pub use gateway::GatewayStrategy;
pub use pattern_fallback::PatternFallbackStrategy;
pub use registry_lookup::RegistryLookupStrategy;
