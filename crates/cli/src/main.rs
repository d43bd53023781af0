use clap::Parser;
use sidecar_relay_domain::CliOverrides;
use std::net::SocketAddr;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "sidecar-relay")]
#[command(version)]
#[command(about = "Sidecar Relay - service-discovery reverse proxy for containerized services")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Proxy port every service talks to
    #[arg(short = 'p', long)]
    proxy_port: Option<u16>,

    /// Standalone registration API port (0 disables it)
    #[arg(short = 'w', long)]
    web_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// DNS suffix for bare service names that were never registered
    #[arg(long)]
    ingress_domain: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        proxy_port: cli.proxy_port,
        web_port: cli.web_port,
        bind_address: cli.bind.clone(),
        ingress_domain: cli.ingress_domain.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting Sidecar Relay v{}", env!("CARGO_PKG_VERSION"));

    let services = di::Services::new(&config);

    if config.server.web_port != 0 {
        let web_addr: SocketAddr =
            format!("{}:{}", config.server.bind_address, config.server.web_port).parse()?;
        let app_state = services.app_state();

        tokio::spawn(async move {
            if let Err(e) = server::start_web_server(web_addr, app_state).await {
                error!(error = %e, "Registration API server error");
            }
        });
    }

    let proxy_addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.proxy_port).parse()?;

    server::start_proxy_server(proxy_addr, services.proxy_state(&config)?).await?;

    info!("Server shutdown complete");
    Ok(())
}
