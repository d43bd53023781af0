use sidecar_relay_application::ports::ServiceRegistry;
use sidecar_relay_application::use_cases::RegisterServicesUseCase;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub register_services: Arc<RegisterServicesUseCase>,
    pub registry: Arc<dyn ServiceRegistry>,
}
