use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::HOST, HeaderMap, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Router,
};
use sidecar_relay_api::ApiError;
use sidecar_relay_application::services::Resolution;
use sidecar_relay_application::use_cases::resolution::strip_port;
use sidecar_relay_application::use_cases::ResolveUpstreamUseCase;
use sidecar_relay_domain::headers::{FORWARDED_HEADERS, HOP_BY_HOP_HEADERS, SOURCE_HEADER};
use sidecar_relay_domain::{
    canonical_port_suffix, Config, DomainError, RequestMetadata, ServiceEndpoint,
};
use sidecar_relay_infrastructure::resolvers::RegistryLookupStrategy;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
pub struct ProxyState {
    resolve: Arc<ResolveUpstreamUseCase>,
    api: Router,
    client: reqwest::Client,
    registration_host: Arc<str>,
    gateway_marker: Option<HeaderName>,
}

impl ProxyState {
    pub fn new(
        resolve: Arc<ResolveUpstreamUseCase>,
        api: Router,
        config: &Config,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_secs(config.resolver.upstream_timeout))
            .build()?;

        let gateway = &config.resolver.gateway;
        let gateway_marker = if gateway.enabled {
            Some(HeaderName::from_bytes(gateway.marker_header.as_bytes())?)
        } else {
            None
        };

        Ok(Self {
            resolve,
            api,
            client,
            registration_host: Arc::from(config.server.registration_host.as_str()),
            gateway_marker,
        })
    }
}

pub fn create_proxy_app(state: ProxyState) -> Router {
    Router::new()
        .fallback(proxy_handler)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn start_proxy_server(bind_addr: SocketAddr, state: ProxyState) -> anyhow::Result<()> {
    info!(bind_address = %bind_addr, "Starting proxy server");

    let app = create_proxy_app(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("Proxy server started successfully");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn proxy_handler(State(state): State<ProxyState>, req: Request) -> Response {
    let host = request_host(&req);

    if strip_port(&host).eq_ignore_ascii_case(&state.registration_host) {
        return match state.api.clone().oneshot(req).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
    }

    let source = req
        .headers()
        .get(SOURCE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let gateway_marker = state
        .gateway_marker
        .as_ref()
        .is_some_and(|name| req.headers().contains_key(name));
    let mut metadata = RequestMetadata::new(source, gateway_marker);

    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    let resolution = match state.resolve.execute(&host, &path_and_query, &mut metadata) {
        Ok(resolution) => resolution,
        Err(e) => {
            warn!(
                host = %host,
                source = metadata.source_or_unknown(),
                "No upstream for request"
            );
            return ApiError(e).into_response();
        }
    };

    let method = req.method().clone();
    let path = metadata
        .rewritten_path
        .clone()
        .unwrap_or(path_and_query);

    match forward(&state, req, &host, &path, &resolution).await {
        Ok(response) => {
            info!(
                method = %method,
                path = %path,
                target = %resolution.target,
                strategy = resolution.strategy,
                origin = metadata.origin.as_str(),
                source = metadata.source_or_unknown(),
                status = response.status().as_u16(),
                "Proxied request"
            );
            response
        }
        Err(e) => {
            warn!(
                method = %method,
                path = %path,
                target = %resolution.target,
                source = metadata.source_or_unknown(),
                error = %e,
                "Upstream request failed"
            );
            ApiError(e).into_response()
        }
    }
}

fn request_host(req: &Request) -> String {
    req.headers()
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| req.uri().host())
        .unwrap_or_default()
        .to_string()
}

async fn forward(
    state: &ProxyState,
    req: Request,
    host: &str,
    path: &str,
    resolution: &Resolution,
) -> Result<Response, DomainError> {
    let (parts, body) = req.into_parts();
    let url = format!("{}{}", resolution.target.trim_end_matches('/'), path);

    let mut headers = upstream_headers(&parts.headers);
    if resolution.strategy == RegistryLookupStrategy::NAME {
        if let Some(value) = restored_host(strip_port(host)) {
            headers.insert(HOST, value);
        }
    }

    let upstream = state
        .client
        .request(parts.method, &url)
        .headers(headers)
        .body(reqwest::Body::wrap_stream(body.into_data_stream()))
        .send()
        .await
        .map_err(|e| DomainError::Transport(format!("{}: {}", url, e)))?;

    let mut response = Response::builder().status(upstream.status());
    if let Some(response_headers) = response.headers_mut() {
        for (name, value) in upstream.headers() {
            if !is_hop_by_hop(name.as_str()) {
                response_headers.append(name.clone(), value.clone());
            }
        }
    }

    response
        .body(Body::from_stream(upstream.bytes_stream()))
        .map_err(|e| DomainError::Transport(e.to_string()))
}

/// Inbound headers minus the ones that must not reach a backend. `Host` is dropped too; the
/// client derives it from the target unless it is restored.
fn upstream_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        let name_str = name.as_str();
        if name == HOST
            || name_str == SOURCE_HEADER
            || FORWARDED_HEADERS.contains(&name_str)
            || is_hop_by_hop(name_str)
        {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }
    headers
}

fn is_hop_by_hop(name: &str) -> bool {
    HOP_BY_HOP_HEADERS.contains(&name)
}

/// The logical `{service}[:port]` a caller addressed, recovered from its HostPattern.
fn restored_host(pattern: &str) -> Option<HeaderValue> {
    let endpoint = ServiceEndpoint::decode(pattern).ok()?;
    let host = format!(
        "{}{}",
        endpoint.service_name,
        canonical_port_suffix(endpoint.protocol, endpoint.public_port)
    );
    HeaderValue::from_str(&host).ok()
}
