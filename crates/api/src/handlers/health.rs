use axum::{extract::State, Json};

use crate::{dto::HealthResponse, state::AppState};

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        registrations: state.registry.len(),
    })
}
