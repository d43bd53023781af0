use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::Json,
    routing::post,
    Router,
};
use sidecar_relay_domain::{headers::ORIGIN_IP_HEADER, DomainError};
use tracing::{error, info};

use crate::{
    dto::{RegisterRequest, RegisterResponse},
    errors::ApiError,
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new().route("/register", post(register_services))
}

/// The body is parsed by hand so that any malformed payload, including a wrong content
/// type, is reported as a registration failure rather than a client error.
async fn register_services(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<RegisterResponse>, ApiError> {
    let request: RegisterRequest = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, "Unparseable registration body");
        DomainError::InternalRegistration(format!("invalid registration body: {}", e))
    })?;

    let source_ip = headers
        .get(ORIGIN_IP_HEADER)
        .and_then(|v| v.to_str().ok());

    let registered = state
        .register_services
        .execute(&request.services, source_ip);

    info!(
        requested = request.services.len(),
        registered = registered.len(),
        source_ip = source_ip.unwrap_or("-"),
        "Registration handled"
    );

    Ok(Json(registered))
}
