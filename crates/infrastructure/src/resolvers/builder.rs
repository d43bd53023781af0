use super::gateway::GatewayStrategy;
use super::pattern_fallback::PatternFallbackStrategy;
use super::registry_lookup::RegistryLookupStrategy;
use sidecar_relay_application::ports::{ResolverStrategy, ServiceRegistry};
use sidecar_relay_application::services::{PrioritizedStrategy, ResolverChain, FALLBACK_PRIORITY};
use sidecar_relay_domain::config::ResolverConfig;
use std::sync::Arc;
use tracing::info;

pub const GATEWAY_PRIORITY: i32 = 100;
pub const REGISTRY_PRIORITY: i32 = 0;
pub const PATTERN_FALLBACK_PRIORITY: i32 = FALLBACK_PRIORITY;

pub struct ResolverChainBuilder {
    registry: Arc<dyn ServiceRegistry>,
    config: ResolverConfig,
    extra: Vec<PrioritizedStrategy>,
}

impl ResolverChainBuilder {
    pub fn new(registry: Arc<dyn ServiceRegistry>) -> Self {
        Self {
            registry,
            config: ResolverConfig::default(),
            extra: vec![],
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_ingress_domain(mut self, domain: impl Into<String>) -> Self {
        self.config.ingress_domain = Some(domain.into());
        self
    }

    pub fn without_gateway(mut self) -> Self {
        self.config.gateway.enabled = false;
        self
    }

    /// Adds a strategy alongside the built-in ones.
    pub fn with_strategy(mut self, priority: i32, strategy: Arc<dyn ResolverStrategy>) -> Self {
        self.extra.push(PrioritizedStrategy::new(priority, strategy));
        self
    }

    pub fn build(self) -> ResolverChain {
        info!(
            gateway = self.config.gateway.enabled,
            ingress_domain = self.config.ingress_domain.as_deref().unwrap_or("-"),
            extra = self.extra.len(),
            "Building resolver chain"
        );

        let registry_lookup: Arc<dyn ResolverStrategy> =
            Arc::new(RegistryLookupStrategy::new(self.registry));

        let mut strategies = vec![PrioritizedStrategy::new(
            REGISTRY_PRIORITY,
            registry_lookup.clone(),
        )];

        if self.config.gateway.enabled {
            strategies.push(PrioritizedStrategy::new(
                GATEWAY_PRIORITY,
                Arc::new(GatewayStrategy::new(self.config.gateway, registry_lookup)),
            ));
        }

        strategies.extend(self.extra);
        strategies.push(PrioritizedStrategy::new(
            PATTERN_FALLBACK_PRIORITY,
            Arc::new(PatternFallbackStrategy::new(self.config.ingress_domain)),
        ));

        let chain = ResolverChain::new(strategies);
        info!(strategies = ?chain.strategy_names(), "Resolver chain built");
        chain
    }
}
