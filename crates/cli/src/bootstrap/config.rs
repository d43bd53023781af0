use sidecar_relay_domain::{CliOverrides, Config};
use tracing::info;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;

    info!(
        proxy_port = config.server.proxy_port,
        web_port = config.server.web_port,
        ingress_domain = config.resolver.ingress_domain.as_deref().unwrap_or("-"),
        "Configuration loaded"
    );
    Ok(config)
}
