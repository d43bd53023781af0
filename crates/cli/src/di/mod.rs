use axum::Router;
use sidecar_relay_api::{create_api_routes, AppState};
use sidecar_relay_application::ports::ServiceRegistry;
use sidecar_relay_application::use_cases::{RegisterServicesUseCase, ResolveUpstreamUseCase};
use sidecar_relay_domain::Config;
use sidecar_relay_infrastructure::registry::InMemoryServiceRegistry;
use sidecar_relay_infrastructure::resolvers::ResolverChainBuilder;
use std::sync::Arc;

use crate::server::ProxyState;

/// Everything the listeners share. The registry is created once here and handed to both
/// the registration use case and the resolver chain.
pub struct Services {
    pub registry: Arc<dyn ServiceRegistry>,
    pub register_services: Arc<RegisterServicesUseCase>,
    pub resolve_upstream: Arc<ResolveUpstreamUseCase>,
}

impl Services {
    pub fn new(config: &Config) -> Self {
        let registry: Arc<dyn ServiceRegistry> = Arc::new(InMemoryServiceRegistry::new());

        let chain = ResolverChainBuilder::new(registry.clone())
            .with_config(config.resolver.clone())
            .build();

        Self {
            register_services: Arc::new(RegisterServicesUseCase::new(registry.clone())),
            resolve_upstream: Arc::new(ResolveUpstreamUseCase::new(Arc::new(chain))),
            registry,
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            register_services: self.register_services.clone(),
            registry: self.registry.clone(),
        }
    }

    pub fn api_router(&self) -> Router {
        create_api_routes(self.app_state())
    }

    pub fn proxy_state(&self, config: &Config) -> anyhow::Result<ProxyState> {
        ProxyState::new(self.resolve_upstream.clone(), self.api_router(), config)
    }
}
