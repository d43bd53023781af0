use sidecar_relay_api::{create_api_routes, AppState};
use std::net::SocketAddr;
use tracing::info;

/// Optional listener serving only the registration API.
pub async fn start_web_server(bind_addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    info!(
        bind_address = %bind_addr,
        register_url = format!("http://{}/register", bind_addr),
        "Starting registration API server"
    );

    let app = create_api_routes(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Registration API server started successfully");

    axum::serve(listener, app).await?;

    Ok(())
}
